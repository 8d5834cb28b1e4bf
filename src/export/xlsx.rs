// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::date_to_excel_serial;
use crate::export::model::{ExportReport, get_headers};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Single sheet: title, metric lines, then the styled daily table.
pub(crate) fn export_xlsx(report: &ExportReport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Dashboard").map_err(to_app_error)?;

    let title_format = Format::new().set_bold().set_font_size(14);
    worksheet
        .write_with_format(0, 0, report.title(), &title_format)
        .map_err(to_app_error)?;

    let mut row: u32 = 1;
    for line in report.summary_lines() {
        worksheet.write(row, 0, line).map_err(to_app_error)?;
        row += 1;
    }
    row += 1;

    if report.days.is_empty() {
        worksheet
            .write(row, 0, "No data for the selected filters.")
            .map_err(to_app_error)?;
        save(&mut workbook, path)?;
        notify_export_success("XLSX (empty dataset)", path);
        return Ok(());
    }

    // ---------------------------
    // Header
    // ---------------------------
    let headers = get_headers();
    let header_row = row;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(header_row, col as u16, *header, &header_format)
            .map_err(to_app_error)?;
    }
    worksheet.set_freeze_panes(header_row + 1, 0).ok();

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();
    // metric lines live in column A; keep it readable but not huge
    col_widths[0] = col_widths[0].max(12);

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (i, day) in report.days.iter().enumerate() {
        let r = header_row + 1 + i as u32;
        let band = if i % 2 == 0 { band1 } else { band2 };

        write_number(worksheet, r, 0, Some(day.day as f64), band, None)?;
        write_number(
            worksheet,
            r,
            1,
            day.date.map(date_to_excel_serial),
            band,
            Some("yyyy-mm-dd"),
        )?;
        write_number(worksheet, r, 2, Some(day.fuel_liters), band, Some("0.00"))?;
        write_number(worksheet, r, 3, day.real_rate, band, Some("0.00"))?;
        write_number(worksheet, r, 4, day.ideal_rate, band, Some("0.00"))?;

        col_widths[1] = col_widths[1].max(10);
        col_widths[2] = col_widths[2].max(format!("{:.2}", day.fuel_liters).len());
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_app_error)?;
    }

    save(&mut workbook, path)?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// Numeric cell with banding; a gap is written as an empty styled cell.
fn write_number(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<f64>,
    bg: Color,
    num_format: Option<&str>,
) -> AppResult<()> {
    let mut fmt = Format::new()
        .set_align(FormatAlign::Right)
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);
    if let Some(nf) = num_format {
        fmt = fmt.set_num_format(nf);
    }

    match value {
        Some(v) => worksheet.write_with_format(row, col, v, &fmt),
        None => worksheet.write_blank(row, col, &fmt),
    }
    .map_err(to_app_error)?;

    Ok(())
}

fn save(workbook: &mut Workbook, path: &Path) -> AppResult<()> {
    workbook.save(path).map_err(to_app_error)
}

fn to_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
