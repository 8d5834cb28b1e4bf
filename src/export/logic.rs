// src/export/logic.rs

use crate::core::logic::DashboardView;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::ExportReport;
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use crate::utils::path::require_absolute;
use std::io::BufRead;
use std::path::PathBuf;

/// High-level export of one dashboard render.
pub struct ExportLogic;

impl ExportLogic {
    /// Write `view` to `file` (absolute path) in `format`.
    ///
    /// An existing file is only replaced with `force` or after a "yes" on
    /// `answers`. Returns the written path.
    pub fn export<R: BufRead>(
        view: &DashboardView,
        format: ExportFormat,
        file: &str,
        force: bool,
        answers: &mut R,
    ) -> AppResult<PathBuf> {
        let path = require_absolute(file)?;

        ensure_writable(&path, force, answers)?;

        let report = ExportReport::from_view(view);

        if report.days.is_empty() {
            warning("No data for the selected filters: exporting metrics only.");
        }

        match format {
            ExportFormat::Csv => export_csv(&report, &path)?,
            ExportFormat::Json => export_json(&report, &path)?,
            ExportFormat::Xlsx => export_xlsx(&report, &path)?,
            ExportFormat::Pdf => export_pdf(&report, &path)?,
        }

        Ok(path)
    }
}
