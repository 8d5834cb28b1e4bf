// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{ExportReport, days_to_table, get_headers};
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use crate::ui::messages::info;
use std::path::Path;

/// Metrics and daily table, followed by a fuel bar chart page.
pub(crate) fn export_pdf(report: &ExportReport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let headers = get_headers();
    let rows: Vec<Vec<String>> = days_to_table(&report.days)
        .into_iter()
        .map(|r| {
            r.into_iter()
                .map(|c| if c.is_empty() { "--".to_string() } else { c })
                .collect()
        })
        .collect();

    let mut pdf = PdfManager::new();
    pdf.write_table(&report.title(), &report.summary_lines(), &headers, &rows);

    let bars: Vec<(u32, f64)> = report.days.iter().map(|d| (d.day, d.fuel_liters)).collect();
    if !bars.is_empty() {
        pdf.write_bar_chart("Daily fuel consumption (liters)", &bars);
    }

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
