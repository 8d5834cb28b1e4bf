use chrono::NaiveDate;
use serde::Serialize;

/// One row of the maintenance sheet. Only the row with the latest
/// `last_service_date` is authoritative for a machine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceRecord {
    pub machine_id: String,
    pub last_service_date: NaiveDate,
    pub hours_at_last_service: f64,
    pub service_interval_hours: f64,
}
