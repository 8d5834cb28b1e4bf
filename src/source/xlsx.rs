//! Read-only XLSX container reader.
//!
//! Only what the dashboard needs: sheet names and a dense grid of cell values
//! per sheet. Styles, formulas (beyond their cached value) and comments are
//! ignored.

use crate::errors::{AppError, AppResult};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::io::{BufReader, Cursor, Read, Seek};

/// Worksheet limits of the file format.
pub const MAX_ROWS: usize = 1_048_576;
pub const MAX_COLUMNS: usize = 16_384;

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Cell rendered as text, `None` for blanks. Integral numbers lose their
    /// decimal part so that numeric machine ids read as `12`, not `12.0`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => {
                let t = s.trim();
                (!t.is_empty()).then(|| t.to_string())
            }
            Cell::Number(n) => Some(format_number(*n)),
            Cell::Bool(b) => Some(b.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Dates are stored either as Excel serial numbers or as text.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Number(n) => excel_serial_to_date(*n),
            Cell::Text(s) => parse_date_text(s.trim()),
            _ => None,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Convert an Excel serial (1900 date system) into a calendar date.
/// The time-of-day fraction is dropped.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    // 1899-12-30 absorbs Excel's phantom 1900-02-29 for every serial after it.
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64))
}

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    let dt_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
    for fmt in dt_formats.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    let date_formats = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d"];
    for fmt in date_formats.iter() {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    None
}

/// One worksheet as a row-major grid. Rows are padded only as far as their
/// last non-empty cell.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&Cell::Empty)
    }

    fn set(&mut self, row: usize, col: usize, value: Cell) -> AppResult<()> {
        if row >= MAX_ROWS || col >= MAX_COLUMNS {
            return Err(AppError::Workbook(format!(
                "sheet '{}': cell (row {}, column {}) is outside the worksheet",
                self.name,
                row + 1,
                col + 1
            )));
        }
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let r = &mut self.rows[row];
        if r.len() <= col {
            r.resize(col + 1, Cell::Empty);
        }
        r[col] = value;
        Ok(())
    }
}

/// All sheets of a workbook, in workbook order.
#[derive(Debug, Clone, Default)]
pub struct RawWorkbook {
    sheets: Vec<Sheet>,
}

impl RawWorkbook {
    pub fn from_bytes(bytes: &[u8]) -> AppResult<Self> {
        Self::read(Cursor::new(bytes))
    }

    pub fn read<R: Read + Seek>(reader: R) -> AppResult<Self> {
        let mut archive = zip::ZipArchive::new(reader)?;

        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(AppError::Workbook("missing [Content_Types].xml".into()));
        }

        let shared_strings = read_shared_strings(&mut archive)?;
        let sheet_info = read_workbook_xml(&mut archive)?;
        let sheet_paths = read_workbook_rels(&mut archive)?;

        let mut sheets = Vec::with_capacity(sheet_info.len());
        for (name, r_id) in sheet_info {
            let Some(path) = sheet_paths.get(&r_id) else {
                continue;
            };
            let mut sheet = Sheet {
                name,
                rows: Vec::new(),
            };
            read_worksheet(&mut archive, path, &mut sheet, &shared_strings)?;
            sheets.push(sheet);
        }

        Ok(Self { sheets })
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Sheet lookup; names compare trimmed and case-insensitively.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        let wanted = name.trim().to_lowercase();
        self.sheets
            .iter()
            .find(|s| s.name.trim().to_lowercase() == wanted)
    }
}

// ---------------------------
// Archive parts
// ---------------------------

fn read_shared_strings<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> AppResult<Vec<String>> {
    let mut strings = Vec::new();

    let file = match archive.by_name("xl/sharedStrings.xml") {
        Ok(f) => f,
        Err(_) => return Ok(strings), // no shared strings is valid
    };

    let mut xml_reader = Reader::from_reader(BufReader::new(file));
    xml_reader.trim_text(false);

    let mut buf = Vec::new();
    let mut current = String::new();
    let mut in_si = false;
    let mut in_t = false;
    // phonetic runs carry their own <t> elements
    let mut in_rph = false;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"si" => {
                    in_si = true;
                    current.clear();
                }
                b"rPh" => in_rph = true,
                b"t" if in_si && !in_rph => in_t = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"si" => {
                    strings.push(std::mem::take(&mut current));
                    in_si = false;
                }
                b"rPh" => in_rph = false,
                b"t" => in_t = false,
                _ => {}
            },
            Event::Empty(e) if e.name().as_ref() == b"si" => {
                strings.push(String::new());
            }
            Event::Text(e) if in_t => {
                current.push_str(&e.unescape()?);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}

/// (sheet name, relationship id) in workbook order.
fn read_workbook_xml<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
) -> AppResult<Vec<(String, String)>> {
    let file = archive
        .by_name("xl/workbook.xml")
        .map_err(|_| AppError::Workbook("missing xl/workbook.xml".into()))?;

    let mut xml_reader = Reader::from_reader(BufReader::new(file));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"sheet" => {
                let name = attr(&e, b"name");
                let r_id = attr(&e, b"r:id");
                if let (Some(name), Some(r_id)) = (name, r_id) {
                    sheets.push((name, r_id));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Relationship id → worksheet part path.
fn read_workbook_rels<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
) -> AppResult<HashMap<String, String>> {
    let file = archive
        .by_name("xl/_rels/workbook.xml.rels")
        .map_err(|_| AppError::Workbook("missing xl/_rels/workbook.xml.rels".into()))?;

    let mut xml_reader = Reader::from_reader(BufReader::new(file));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut rels = HashMap::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"Relationship" => {
                let id = attr(&e, b"Id");
                let target = attr(&e, b"Target");
                let rel_type = attr(&e, b"Type");

                if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type)
                    && rel_type.ends_with("/worksheet")
                {
                    // Target is relative to xl/ unless absolute
                    let full_path = match target.strip_prefix('/') {
                        Some(abs) => abs.to_string(),
                        None => format!("xl/{target}"),
                    };
                    rels.insert(id, full_path);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

fn read_worksheet<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    path: &str,
    sheet: &mut Sheet,
    shared_strings: &[String],
) -> AppResult<()> {
    let file = archive
        .by_name(path)
        .map_err(|_| AppError::Workbook(format!("missing worksheet part {path}")))?;

    let mut xml_reader = Reader::from_reader(BufReader::new(file));
    xml_reader.trim_text(false);

    let mut buf = Vec::new();

    let mut current_row: usize = 0;
    let mut next_col: usize = 0;

    let mut in_cell = false;
    let mut in_value = false;
    let mut in_inline = false;
    let mut cell_pos: (usize, usize) = (0, 0);
    let mut cell_type: Option<String> = None;
    let mut value: Option<String> = None;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"row" => {
                    current_row = row_index(&e)?.unwrap_or(current_row);
                    next_col = 0;
                }
                b"c" => {
                    in_cell = true;
                    cell_pos = cell_position(&e, current_row, next_col)?;
                    cell_type = attr(&e, b"t");
                    value = None;
                }
                b"v" if in_cell => in_value = true,
                b"is" if in_cell => in_inline = true,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"row" => {
                    current_row = row_index(&e)?.map(|r| r + 1).unwrap_or(current_row + 1);
                }
                b"c" => {
                    // empty cell: only advances the column cursor
                    let (_, col) = cell_position(&e, current_row, next_col)?;
                    next_col = col + 1;
                }
                _ => {}
            },
            Event::Text(e) if in_value || in_inline => {
                let text = e.unescape()?;
                value.get_or_insert_with(String::new).push_str(&text);
            }
            Event::End(e) => match e.name().as_ref() {
                b"row" => {
                    current_row += 1;
                    next_col = 0;
                }
                b"c" => {
                    let cell = decode_cell(cell_type.as_deref(), value.take(), shared_strings)?;
                    if !cell.is_empty() {
                        sheet.set(cell_pos.0, cell_pos.1, cell)?;
                    }
                    next_col = cell_pos.1 + 1;
                    in_cell = false;
                    in_inline = false;
                }
                b"v" => in_value = false,
                b"is" => {
                    in_inline = false;
                    cell_type = Some("inlineStr".to_string());
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn decode_cell(
    cell_type: Option<&str>,
    value: Option<String>,
    shared_strings: &[String],
) -> AppResult<Cell> {
    let Some(value) = value else {
        return Ok(Cell::Empty);
    };

    let cell = match cell_type {
        Some("s") => {
            let idx: usize = value
                .trim()
                .parse()
                .map_err(|_| AppError::Workbook(format!("invalid shared string index: {value}")))?;
            let s = shared_strings.get(idx).ok_or_else(|| {
                AppError::Workbook(format!("shared string index {idx} out of bounds"))
            })?;
            Cell::Text(s.clone())
        }
        Some("b") => Cell::Bool(value.trim() == "1" || value.trim().eq_ignore_ascii_case("true")),
        Some("inlineStr") | Some("str") => Cell::Text(value),
        // error cells (#N/A, #DIV/0!) carry no usable value
        Some("e") => Cell::Empty,
        None | Some("n") => match value.trim().parse::<f64>() {
            Ok(n) => Cell::Number(n),
            Err(_) => Cell::Text(value),
        },
        Some(_) => Cell::Text(value),
    };

    Ok(cell)
}

// ---------------------------
// Attribute helpers
// ---------------------------

fn attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok().map(|v| v.to_string()))
}

/// 0-based row index from `<row r="N">`; `None` when the attribute is absent.
fn row_index(e: &BytesStart) -> AppResult<Option<usize>> {
    let Some(r) = attr(e, b"r") else {
        return Ok(None);
    };
    match r.trim().parse::<usize>() {
        Ok(n) if (1..=MAX_ROWS).contains(&n) => Ok(Some(n - 1)),
        _ => Err(AppError::Workbook(format!("invalid row reference: {r}"))),
    }
}

/// 0-based (row, col) from the `r="B12"` reference, falling back to the cursor
/// when the cell carries no reference.
fn cell_position(e: &BytesStart, row: usize, col: usize) -> AppResult<(usize, usize)> {
    match attr(e, b"r") {
        Some(r) => parse_cell_ref(&r)
            .ok_or_else(|| AppError::Workbook(format!("invalid cell reference: {r}"))),
        None => Ok((row, col)),
    }
}

/// `"B12"` → `(11, 1)`. `None` for malformed references and for anything
/// past `XFD1048576`.
pub fn parse_cell_ref(r: &str) -> Option<(usize, usize)> {
    let split = r.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = r.split_at(split);
    if letters.is_empty() {
        return None;
    }

    let mut col: usize = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = ch.to_ascii_uppercase() as usize - 'A' as usize + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
        if col > MAX_COLUMNS {
            return None;
        }
    }

    let row: usize = digits.parse().ok()?;
    if row == 0 || row > MAX_ROWS {
        return None;
    }

    Some((row - 1, col - 1))
}
