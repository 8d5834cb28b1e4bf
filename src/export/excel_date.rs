// src/export/excel_date.rs

use chrono::NaiveDate;

/// Excel serial number (1900 date system) of a calendar date.
pub fn date_to_excel_serial(date: NaiveDate) -> f64 {
    // 1899-12-30 keeps serials aligned with Excel after its phantom 1900-02-29
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN);
    (date - excel_epoch).num_days() as f64
}
