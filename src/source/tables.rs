//! Typed view over the three workbook sheets.
//!
//! Every expected column is resolved once, from the header row, before any
//! data row is read; a missing column is a schema error naming sheet and
//! column.

use super::xlsx::{Cell, RawWorkbook, Sheet};
use crate::errors::{AppError, AppResult};
use crate::models::{
    Dataset, MaintenanceRecord, OperationalRecord, WorkSiteReference, WorkSiteTable,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Column headers, as they appear in the workbook.
pub mod columns {
    pub const OPS_MACHINE_ID: &str = "NUMERO_MAQ";
    pub const OPS_MACHINE_NAME: &str = "NOMBRE_MAQUINA";
    pub const OPS_DATE: &str = "FECHA";
    pub const OPS_HOROMETER_END: &str = "HOROMETRO_FINAL";
    pub const OPS_FUEL_LITERS: &str = "TOTAL_LTS";
    pub const OPS_WORK_SITE: &str = "FAENA";
    pub const OPS_THROUGHPUT_RATE: &str = "RENDIMIENTO_HORA";

    pub const MAINT_MACHINE_ID: &str = "NRO_MAQUINA";
    pub const MAINT_LAST_SERVICE_DATE: &str = "FECHA ULTIMO MANTENIMIENTO";
    pub const MAINT_HOURS_AT_LAST_SERVICE: &str = "HORAS AL ULTIMO MANTENIMIENTO";
    pub const MAINT_SERVICE_INTERVAL: &str = "HORAS ENTRE CADA MANTENCIÓN";

    pub const SITE_NAME: &str = "FAENA";
    pub const SITE_IDEAL_RATE: &str = "RENDIMIENTO POR HORA";
}

/// Sheet names of the three tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetNames {
    #[serde(default = "default_operations_sheet")]
    pub operations: String,
    #[serde(default = "default_maintenance_sheet")]
    pub maintenance: String,
    #[serde(default = "default_work_sites_sheet")]
    pub work_sites: String,
}

fn default_operations_sheet() -> String {
    "BASE DE DATOS".to_string()
}
fn default_maintenance_sheet() -> String {
    "MANTENIMIENTOS".to_string()
}
fn default_work_sites_sheet() -> String {
    "FAENAS".to_string()
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            operations: default_operations_sheet(),
            maintenance: default_maintenance_sheet(),
            work_sites: default_work_sites_sheet(),
        }
    }
}

/// Header row of a sheet: normalized column name → column index.
struct Header<'a> {
    sheet: &'a Sheet,
    first_data_row: usize,
    index: HashMap<String, usize>,
}

impl<'a> Header<'a> {
    /// The first non-empty row is the header.
    fn read(sheet: &'a Sheet) -> Self {
        let header_row = sheet
            .rows
            .iter()
            .position(|r| r.iter().any(|c| !c.is_empty()));

        let mut index = HashMap::new();
        if let Some(row) = header_row {
            for (col, cell) in sheet.rows[row].iter().enumerate() {
                if let Some(name) = cell.as_text() {
                    index.entry(normalize(&name)).or_insert(col);
                }
            }
        }

        Self {
            sheet,
            first_data_row: header_row.map(|r| r + 1).unwrap_or(sheet.rows.len()),
            index,
        }
    }

    fn require(&self, column: &str) -> AppResult<usize> {
        self.index
            .get(&normalize(column))
            .copied()
            .ok_or_else(|| AppError::MissingColumn {
                sheet: self.sheet.name.clone(),
                column: column.to_string(),
            })
    }

    fn data_rows(&self) -> impl Iterator<Item = &'a [Cell]> {
        let sheet: &'a Sheet = self.sheet;
        sheet
            .rows
            .iter()
            .skip(self.first_data_row)
            .map(Vec::as_slice)
            .filter(|r| r.iter().any(|c| !c.is_empty()))
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_uppercase()
}

fn at(row: &[Cell], col: usize) -> &Cell {
    row.get(col).unwrap_or(&Cell::Empty)
}

fn require_sheet<'a>(workbook: &'a RawWorkbook, name: &str) -> AppResult<&'a Sheet> {
    workbook.sheet(name).ok_or_else(|| AppError::MissingSheet {
        sheet: name.to_string(),
    })
}

/// Load and type-check all three tables.
pub fn load_dataset(workbook: &RawWorkbook, names: &SheetNames) -> AppResult<Dataset> {
    let operations = load_operations(require_sheet(workbook, &names.operations)?)?;
    let (maintenance, skipped) = load_maintenance(require_sheet(workbook, &names.maintenance)?)?;
    let work_sites = load_work_sites(require_sheet(workbook, &names.work_sites)?)?;

    Ok(Dataset {
        operations,
        maintenance,
        work_sites: WorkSiteTable::new(work_sites),
        skipped_maintenance_rows: skipped,
    })
}

/// Rows without machine id or date are treated as blank and skipped.
pub fn load_operations(sheet: &Sheet) -> AppResult<Vec<OperationalRecord>> {
    use columns::*;

    let header = Header::read(sheet);
    let c_id = header.require(OPS_MACHINE_ID)?;
    let c_name = header.require(OPS_MACHINE_NAME)?;
    let c_date = header.require(OPS_DATE)?;
    let c_horo = header.require(OPS_HOROMETER_END)?;
    let c_fuel = header.require(OPS_FUEL_LITERS)?;
    let c_site = header.require(OPS_WORK_SITE)?;
    let c_rate = header.require(OPS_THROUGHPUT_RATE)?;

    let records = header
        .data_rows()
        .filter_map(|row| {
            let machine_id = at(row, c_id).as_text()?;
            let date = at(row, c_date).as_date()?;
            Some(OperationalRecord {
                machine_id,
                machine_name: at(row, c_name).as_text().unwrap_or_default(),
                date,
                horometer_end: at(row, c_horo).as_number(),
                fuel_liters: at(row, c_fuel).as_number(),
                work_site: at(row, c_site).as_text(),
                throughput_rate: at(row, c_rate).as_number(),
            })
        })
        .collect();

    Ok(records)
}

/// Returns the records plus the number of rows dropped for a missing value.
pub fn load_maintenance(sheet: &Sheet) -> AppResult<(Vec<MaintenanceRecord>, usize)> {
    use columns::*;

    let header = Header::read(sheet);
    let c_id = header.require(MAINT_MACHINE_ID)?;
    let c_date = header.require(MAINT_LAST_SERVICE_DATE)?;
    let c_hours = header.require(MAINT_HOURS_AT_LAST_SERVICE)?;
    let c_interval = header.require(MAINT_SERVICE_INTERVAL)?;

    let mut records = Vec::new();
    let mut skipped = 0;

    for row in header.data_rows() {
        match maintenance_row(row, [c_id, c_date, c_hours, c_interval]) {
            Some(r) => records.push(r),
            None => skipped += 1,
        }
    }

    Ok((records, skipped))
}

fn maintenance_row(row: &[Cell], cols: [usize; 4]) -> Option<MaintenanceRecord> {
    let [c_id, c_date, c_hours, c_interval] = cols;
    Some(MaintenanceRecord {
        machine_id: at(row, c_id).as_text()?,
        last_service_date: at(row, c_date).as_date()?,
        hours_at_last_service: at(row, c_hours).as_number()?,
        service_interval_hours: at(row, c_interval).as_number()?,
    })
}

pub fn load_work_sites(sheet: &Sheet) -> AppResult<Vec<WorkSiteReference>> {
    use columns::*;

    let header = Header::read(sheet);
    let c_site = header.require(SITE_NAME)?;
    let c_rate = header.require(SITE_IDEAL_RATE)?;

    let rows = header
        .data_rows()
        .filter_map(|row| {
            Some(WorkSiteReference {
                work_site: at(row, c_site).as_text()?,
                ideal_rate: at(row, c_rate).as_number()?,
            })
        })
        .collect();

    Ok(rows)
}
