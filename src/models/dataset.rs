use super::operational::natural_cmp;
use super::{MaintenanceRecord, OperationalRecord, WorkSiteTable};
use chrono::NaiveDate;

/// The three workbook tables, loaded once per session and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub operations: Vec<OperationalRecord>,
    pub maintenance: Vec<MaintenanceRecord>,
    pub work_sites: WorkSiteTable,
    /// Maintenance rows dropped at load time because a value was missing.
    pub skipped_maintenance_rows: usize,
}

impl Dataset {
    /// Distinct machine ids in natural order.
    pub fn machines(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .operations
            .iter()
            .map(|r| r.machine_id.clone())
            .collect();
        ids.sort_by(|a, b| natural_cmp(a, b));
        ids.dedup();
        ids
    }

    pub fn has_machine(&self, machine_id: &str) -> bool {
        self.operations.iter().any(|r| r.machine_id == machine_id)
    }

    /// Every operational row of a machine, in sheet order.
    pub fn operations_for(&self, machine_id: &str) -> Vec<&OperationalRecord> {
        self.operations
            .iter()
            .filter(|r| r.machine_id == machine_id)
            .collect()
    }

    pub fn maintenance_for(&self, machine_id: &str) -> Vec<&MaintenanceRecord> {
        self.maintenance
            .iter()
            .filter(|r| r.machine_id == machine_id)
            .collect()
    }

    /// Latest date in the whole operations table ("data updated to").
    pub fn last_update(&self) -> Option<NaiveDate> {
        self.operations.iter().map(|r| r.date).max()
    }
}
