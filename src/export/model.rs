// src/export/model.rs

use crate::core::logic::DashboardView;
use crate::models::Month;
use crate::utils::formatting::{GAP, fmt_hours, fmt_optional};
use chrono::NaiveDate;
use serde::Serialize;

/// One exported day. Missing rates stay empty, never zero.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DailyExport {
    pub day: u32,
    pub date: Option<NaiveDate>,
    pub fuel_liters: f64,
    pub real_rate: Option<f64>,
    pub ideal_rate: Option<f64>,
}

/// Metrics plus the daily series, as written by every format.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ExportReport {
    pub machine_id: String,
    pub machine_name: String,
    pub month: Option<Month>,
    pub sites: Vec<String>,
    pub current_horometer: Option<f64>,
    pub hours_remaining: Option<f64>,
    pub status: Option<String>,
    pub default_interval: bool,
    pub days: Vec<DailyExport>,
}

impl ExportReport {
    pub fn from_view(view: &DashboardView) -> Self {
        let days = view
            .series
            .rows()
            .into_iter()
            .map(|r| DailyExport {
                day: r.day,
                date: view
                    .month
                    .and_then(|m| NaiveDate::from_ymd_opt(m.year, m.month, r.day)),
                fuel_liters: r.fuel_liters,
                real_rate: r.real_rate,
                ideal_rate: r.ideal_rate,
            })
            .collect();

        Self {
            machine_id: view.machine_id.clone(),
            machine_name: view.machine_name.clone(),
            month: view.month,
            sites: view
                .sites
                .iter()
                .filter(|s| s.checked)
                .map(|s| s.site.clone())
                .collect(),
            current_horometer: view.maintenance.map(|m| m.current_horometer),
            hours_remaining: view.maintenance.map(|m| m.hours_remaining),
            status: view.maintenance.map(|m| m.status.label().to_string()),
            default_interval: view.maintenance.is_some_and(|m| m.baseline.uses_default()),
            days,
        }
    }

    /// Report title, e.g. "Machine 12 - June 2025".
    pub fn title(&self) -> String {
        match self.month {
            Some(m) => format!("Machine {} - {} {}", self.machine_id, m.name(), m.year),
            None => format!("Machine {}", self.machine_id),
        }
    }

    /// Metric lines printed above the table (PDF, XLSX).
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!(
                "Machine name: {}",
                if self.machine_name.is_empty() {
                    GAP
                } else {
                    self.machine_name.as_str()
                }
            ),
            format!(
                "Hours to next service: {}",
                self.hours_remaining
                    .map(fmt_hours)
                    .unwrap_or_else(|| GAP.to_string())
            ),
            format!(
                "Maintenance status: {}{}",
                self.status.as_deref().unwrap_or(GAP),
                if self.default_interval {
                    " (default interval)"
                } else {
                    ""
                }
            ),
            format!(
                "Work-sites: {}",
                if self.sites.is_empty() {
                    GAP.to_string()
                } else {
                    self.sites.join(", ")
                }
            ),
        ]
    }
}

/// Table header for XLSX / PDF
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec!["day", "date", "fuel_liters", "real_rate", "ideal_rate"]
}

/// Day as a row of strings; gaps become empty cells (PDF shows them as `--`).
pub(crate) fn day_to_row(d: &DailyExport) -> Vec<String> {
    vec![
        d.day.to_string(),
        d.date.map(|x| x.to_string()).unwrap_or_default(),
        format!("{:.2}", d.fuel_liters),
        fmt_optional(d.real_rate),
        fmt_optional(d.ideal_rate),
    ]
}

pub(crate) fn days_to_table(days: &[DailyExport]) -> Vec<Vec<String>> {
    days.iter().map(day_to_row).collect()
}
