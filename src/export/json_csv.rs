// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{DailyExport, ExportReport};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Whole report (metrics + days), pretty-printed. Gaps are `null`.
pub(crate) fn export_json(report: &ExportReport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(report)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// One CSV line: the metric columns repeat on every day so each row stands
/// on its own in a spreadsheet filter.
#[derive(Serialize)]
struct CsvRow<'a> {
    machine_id: &'a str,
    machine_name: &'a str,
    month: String,
    status: Option<&'a str>,
    hours_remaining: Option<f64>,
    day: Option<u32>,
    date: Option<NaiveDate>,
    fuel_liters: Option<f64>,
    real_rate: Option<f64>,
    ideal_rate: Option<f64>,
}

impl<'a> CsvRow<'a> {
    fn metrics(report: &'a ExportReport) -> Self {
        Self {
            machine_id: &report.machine_id,
            machine_name: &report.machine_name,
            month: report.month.map(|m| m.to_string()).unwrap_or_default(),
            status: report.status.as_deref(),
            hours_remaining: report.hours_remaining,
            day: None,
            date: None,
            fuel_liters: None,
            real_rate: None,
            ideal_rate: None,
        }
    }

    fn with_day(report: &'a ExportReport, d: &DailyExport) -> Self {
        Self {
            day: Some(d.day),
            date: d.date,
            fuel_liters: Some(d.fuel_liters),
            real_rate: d.real_rate,
            ideal_rate: d.ideal_rate,
            ..Self::metrics(report)
        }
    }
}

/// Metric columns followed by the daily series. Gaps are empty fields; an
/// empty selection leaves a single metrics-only line.
pub(crate) fn export_csv(report: &ExportReport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    let rows: Vec<CsvRow> = if report.days.is_empty() {
        vec![CsvRow::metrics(report)]
    } else {
        report
            .days
            .iter()
            .map(|d| CsvRow::with_day(report, d))
            .collect()
    };

    for row in rows {
        wtr.serialize(row)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
