//! Maintenance status engine: horometer-based service due computation.

use crate::errors::{AppError, AppResult};
use crate::models::{MaintenanceRecord, OperationalRecord};
use chrono::NaiveDate;
use serde::Serialize;

/// Service interval assumed when a machine has no maintenance row.
pub const DEFAULT_SERVICE_INTERVAL_HOURS: f64 = 500.0;

/// Remaining hours at or below which a service is "due soon".
pub const DUE_SOON_HOURS: f64 = 50.0;

/// Traffic light. Variants are ordered from worst to healthiest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceStatus {
    Overdue,
    DueSoon,
    Ok,
}

impl MaintenanceStatus {
    /// First match wins: ≤ 0 overdue, ≤ 50 due soon, otherwise ok.
    pub fn classify(hours_remaining: f64) -> Self {
        if hours_remaining <= 0.0 {
            MaintenanceStatus::Overdue
        } else if hours_remaining <= DUE_SOON_HOURS {
            MaintenanceStatus::DueSoon
        } else {
            MaintenanceStatus::Ok
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MaintenanceStatus::Overdue => "OVERDUE",
            MaintenanceStatus::DueSoon => "DUE_SOON",
            MaintenanceStatus::Ok => "OK",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            MaintenanceStatus::Overdue => "🔴",
            MaintenanceStatus::DueSoon => "🟡",
            MaintenanceStatus::Ok => "🟢",
        }
    }
}

/// Where the service baseline came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BaselineSource {
    Recorded { last_service_date: NaiveDate },
    /// No maintenance row: 0 hours at last service, 500 h interval.
    DefaultInterval,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaintenanceBaseline {
    pub hours_at_last_service: f64,
    pub service_interval_hours: f64,
    pub source: BaselineSource,
}

impl MaintenanceBaseline {
    pub fn uses_default(&self) -> bool {
        matches!(self.source, BaselineSource::DefaultInterval)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaintenanceReport {
    pub current_horometer: f64,
    pub baseline: MaintenanceBaseline,
    pub hours_since_service: f64,
    /// Negative when the service is overdue.
    pub hours_remaining: f64,
    pub status: MaintenanceStatus,
}

/// Horometer of the chronologically latest record. On equal dates the row
/// that comes last in the sheet wins.
pub fn current_horometer(records: &[&OperationalRecord]) -> AppResult<f64> {
    let latest = records
        .iter()
        .max_by_key(|r| r.date)
        .ok_or_else(|| AppError::InsufficientData("machine has no operational records".into()))?;

    latest.horometer_end.ok_or_else(|| {
        AppError::InsufficientData(format!(
            "latest record ({}) has no horometer reading",
            latest.date
        ))
    })
}

/// The maintenance row with the latest service date, or the documented defaults.
pub fn baseline(records: &[&MaintenanceRecord]) -> MaintenanceBaseline {
    match records.iter().max_by_key(|r| r.last_service_date) {
        Some(r) => MaintenanceBaseline {
            hours_at_last_service: r.hours_at_last_service,
            service_interval_hours: r.service_interval_hours,
            source: BaselineSource::Recorded {
                last_service_date: r.last_service_date,
            },
        },
        None => MaintenanceBaseline {
            hours_at_last_service: 0.0,
            service_interval_hours: DEFAULT_SERVICE_INTERVAL_HOURS,
            source: BaselineSource::DefaultInterval,
        },
    }
}

/// Hours since the last service, hours left before the next one, and the light.
///
/// Both slices must already be restricted to one machine; month and site
/// filters must not be applied to `operations`.
pub fn compute_status(
    operations: &[&OperationalRecord],
    maintenance: &[&MaintenanceRecord],
) -> AppResult<MaintenanceReport> {
    let current = current_horometer(operations)?;
    let baseline = baseline(maintenance);

    let hours_since_service = current - baseline.hours_at_last_service;
    let hours_remaining = baseline.service_interval_hours - hours_since_service;

    Ok(MaintenanceReport {
        current_horometer: current,
        baseline,
        hours_since_service,
        hours_remaining,
        status: MaintenanceStatus::classify(hours_remaining),
    })
}
