use crate::core::filter::{self, SiteSelection};
use crate::core::maintenance::{self, MaintenanceReport};
use crate::core::performance::{self, DailySeries};
use crate::errors::{AppError, AppResult};
use crate::models::{Dataset, Month, OperationalRecord};
use chrono::NaiveDate;
use serde::Serialize;

/// What the user picked: machine, month and the work-site check boxes.
/// `None` means "use the default".
#[derive(Debug, Clone, Default)]
pub struct DashboardQuery {
    pub machine: Option<String>,
    pub month: Option<Month>,
    pub sites: SiteSelection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteChoice {
    pub site: String,
    pub checked: bool,
}

/// Everything one render of the dashboard needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub machine_id: String,
    pub machine_name: String,
    pub month: Option<Month>,
    pub available_months: Vec<Month>,
    pub sites: Vec<SiteChoice>,
    /// `None` when the machine has no usable horometer reading.
    pub maintenance: Option<MaintenanceReport>,
    pub series: DailySeries,
    pub last_update: Option<NaiveDate>,
    pub notes: Vec<String>,
}

impl DashboardView {
    pub fn has_data(&self) -> bool {
        !self.series.is_empty()
    }
}

/// One line of the fleet overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetRow {
    pub machine_id: String,
    pub machine_name: String,
    pub maintenance: Option<MaintenanceReport>,
}

pub struct Core;

impl Core {
    /// Machine to show when none was chosen: the first in natural order.
    pub fn default_machine(dataset: &Dataset) -> AppResult<String> {
        dataset
            .machines()
            .into_iter()
            .next()
            .ok_or_else(|| AppError::InsufficientData("the operations table is empty".into()))
    }

    /// Run filter resolver, maintenance engine and aggregator for one render.
    pub fn build_dashboard(dataset: &Dataset, query: &DashboardQuery) -> AppResult<DashboardView> {
        let machine_id = match &query.machine {
            Some(m) if dataset.has_machine(m.trim()) => m.trim().to_string(),
            Some(m) => return Err(AppError::UnknownMachine(m.clone())),
            None => Self::default_machine(dataset)?,
        };

        let machine_records = dataset.operations_for(&machine_id);
        let available_months = filter::available_months(&machine_records);

        // latest month with data unless one was asked for
        let month = query.month.or_else(|| available_months.last().copied());

        let mut notes = Vec::new();

        let (sites, filtered) = match month {
            Some(m) => {
                let resolution = filter::resolve(&dataset.operations, &machine_id, m);
                let selected = query.sites.selected(&resolution.available_sites);
                let filtered = filter::select_sites(&resolution.month_records, &selected);
                let sites = resolution
                    .available_sites
                    .iter()
                    .map(|s| SiteChoice {
                        site: s.clone(),
                        checked: query.sites.is_checked(s),
                    })
                    .collect();
                (sites, filtered)
            }
            None => (Vec::new(), Vec::new()),
        };

        let maintenance = match maintenance::compute_status(
            &machine_records,
            &dataset.maintenance_for(&machine_id),
        ) {
            Ok(report) => {
                if report.baseline.uses_default() {
                    notes.push(format!(
                        "No maintenance record for machine {machine_id}: using default interval of {:.0} h",
                        report.baseline.service_interval_hours
                    ));
                }
                Some(report)
            }
            Err(AppError::InsufficientData(reason)) => {
                notes.push(format!("Maintenance status unavailable: {reason}"));
                None
            }
            Err(e) => return Err(e),
        };

        let series = performance::aggregate(&filtered, &dataset.work_sites);

        Ok(DashboardView {
            machine_name: machine_name(&filtered, &machine_records),
            machine_id,
            month,
            available_months,
            sites,
            maintenance,
            series,
            last_update: dataset.last_update(),
            notes,
        })
    }

    /// Maintenance status of every machine in the operations table.
    pub fn fleet(dataset: &Dataset) -> Vec<FleetRow> {
        dataset
            .machines()
            .into_iter()
            .map(|id| {
                let ops = dataset.operations_for(&id);
                let report = maintenance::compute_status(&ops, &dataset.maintenance_for(&id)).ok();
                FleetRow {
                    machine_name: machine_name(&[], &ops),
                    machine_id: id,
                    maintenance: report,
                }
            })
            .collect()
    }
}

/// Name from the first filtered row; when the selection is empty, from the
/// machine's most recent row.
fn machine_name(filtered: &[&OperationalRecord], machine_records: &[&OperationalRecord]) -> String {
    filtered
        .first()
        .or_else(|| machine_records.iter().max_by_key(|r| r.date))
        .map(|r| r.machine_name.clone())
        .unwrap_or_default()
}
