#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use machdash::config::{Config, UserEntry};
use machdash::export::date_to_excel_serial;
use machdash::session::hash_password;
use rust_xlsxwriter::{Format, Workbook};
use std::fs;
use std::io::{Cursor, Write};
use std::path::PathBuf;
use tempfile::TempDir;

pub const USER: &str = "operator";
pub const PASSWORD: &str = "s3cret-pass";

pub fn mdash() -> Command {
    cargo_bin_cmd!("machdash")
}

/// A fixture cell.
#[derive(Clone, Copy)]
pub enum V {
    N(f64),
    S(&'static str),
    /// ISO date, stored as an Excel serial with a date format
    D(&'static str),
    E,
}

pub struct FixtureSheet {
    pub name: &'static str,
    pub rows: Vec<Vec<V>>,
}

pub fn workbook_bytes(sheets: &[FixtureSheet]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for sheet in sheets {
        let ws = workbook.add_worksheet();
        ws.set_name(sheet.name).expect("sheet name");
        for (r, row) in sheet.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                match *cell {
                    V::N(n) => {
                        ws.write_number(r, c, n).expect("write number");
                    }
                    V::S(s) => {
                        ws.write_string(r, c, s).expect("write string");
                    }
                    V::D(d) => {
                        let date = NaiveDate::parse_from_str(d, "%Y-%m-%d").expect("fixture date");
                        ws.write_number_with_format(r, c, date_to_excel_serial(date), &date_format)
                            .expect("write date");
                    }
                    V::E => {}
                }
            }
        }
    }

    workbook.save_to_buffer().expect("save workbook")
}

pub fn operations_header() -> Vec<V> {
    use V::S;
    vec![
        S("NUMERO_MAQ"),
        S("NOMBRE_MAQUINA"),
        S("FECHA"),
        S("HOROMETRO_FINAL"),
        S("TOTAL_LTS"),
        S("FAENA"),
        S("RENDIMIENTO_HORA"),
    ]
}

/// Machine 12: DUE_SOON (1450 h, serviced at 1000 h, every 500 h), two sites.
/// Machine 7: OVERDUE by 100 h. Machine 3: no maintenance row, site without
/// reference rate.
pub fn standard_sheets() -> Vec<FixtureSheet> {
    use V::{D, E, N, S};

    let mut ops = vec![operations_header()];
    ops.extend([
        vec![N(12.0), S("Excavator CAT 320"), D("2025-05-20"), N(1380.0), N(100.0), S("Norte"), N(11.0)],
        vec![N(12.0), S("Excavator CAT 320"), D("2025-06-02"), N(1420.0), N(120.0), S("Norte"), N(12.0)],
        vec![N(12.0), S("Excavator CAT 320"), D("2025-06-02"), E, N(80.0), S("Sur"), N(9.0)],
        vec![N(12.0), S("Excavator CAT 320"), S("05/06/2025"), N(1450.0), N(150.0), S("Sur"), N(10.0)],
        vec![N(7.0), S("Loader 950"), D("2025-06-03"), N(2100.0), N(200.0), S("Norte"), N(15.0)],
        vec![N(3.0), S("Haul truck"), D("2025-06-04"), N(300.0), N(50.0), S("Centro"), E],
        // blank machine id: ignored
        vec![E, S("nobody"), D("2025-06-09"), N(1.0), N(1.0), S("Norte"), N(1.0)],
    ]);

    let maintenance = vec![
        vec![
            S("NRO_MAQUINA"),
            S("FECHA ULTIMO MANTENIMIENTO"),
            S("HORAS AL ULTIMO MANTENIMIENTO"),
            S("HORAS ENTRE CADA MANTENCIÓN"),
        ],
        vec![N(12.0), D("2025-04-01"), N(1000.0), N(500.0)],
        vec![N(7.0), D("2025-01-10"), N(1500.0), N(500.0)],
        // no interval: skipped
        vec![N(99.0), D("2025-02-01"), N(10.0), E],
    ];

    let work_sites = vec![
        vec![S("FAENA"), S("RENDIMIENTO POR HORA")],
        vec![S("Norte"), N(10.0)],
        vec![S("Sur"), N(8.0)],
    ];

    vec![
        FixtureSheet {
            name: "BASE DE DATOS",
            rows: ops,
        },
        FixtureSheet {
            name: "MANTENIMIENTOS",
            rows: maintenance,
        },
        FixtureSheet {
            name: "FAENAS",
            rows: work_sites,
        },
    ]
}

pub fn standard_workbook() -> Vec<u8> {
    workbook_bytes(&standard_sheets())
}

/// Single-sheet workbook whose worksheet body is `sheet_data`, written part by
/// part so tests can feed the reader XML no spreadsheet writer would emit.
pub fn raw_workbook(sheet_data: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
        let options = zip::write::SimpleFileOptions::default();

        let parts: [(&str, String); 4] = [
            (
                "[Content_Types].xml",
                r#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#.to_string(),
            ),
            (
                "xl/workbook.xml",
                r#"<?xml version="1.0"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="BASE DE DATOS" sheetId="1" r:id="rId1"/></sheets></workbook>"#.to_string(),
            ),
            (
                "xl/_rels/workbook.xml.rels",
                r#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#.to_string(),
            ),
            (
                "xl/worksheets/sheet1.xml",
                format!(
                    r#"<?xml version="1.0"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{sheet_data}</sheetData></worksheet>"#
                ),
            ),
        ];

        for (name, body) in parts {
            zip.start_file(name, options).expect("start zip entry");
            zip.write_all(body.as_bytes()).expect("write zip entry");
        }
        zip.finish().expect("finish zip");
    }
    buf
}

pub fn allow_list() -> Vec<UserEntry> {
    vec![UserEntry {
        username: USER.to_string(),
        password_hash: hash_password(PASSWORD).expect("hash password"),
    }]
}

/// Temp dir with a workbook, a config file pointing at it and an audit DB path.
pub struct TestEnv {
    pub dir: TempDir,
    pub config: PathBuf,
    pub db: PathBuf,
    pub workbook: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_workbook(&standard_workbook())
    }

    pub fn with_workbook(bytes: &[u8]) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let workbook = dir.path().join("operations.xlsx");
        let db = dir.path().join("audit.sqlite");
        let config = dir.path().join("machdash.conf");

        fs::write(&workbook, bytes).expect("write workbook");

        let cfg = Config {
            database: db.to_string_lossy().to_string(),
            workbook_url: workbook.to_string_lossy().to_string(),
            users: allow_list(),
            ..Config::default()
        };
        cfg.save_to(&config).expect("write config");

        Self {
            dir,
            config,
            db,
            workbook,
        }
    }

    /// Command with config, database and the valid credentials.
    pub fn cmd(&self) -> Command {
        self.cmd_as(USER, PASSWORD)
    }

    pub fn cmd_as(&self, user: &str, password: &str) -> Command {
        let mut c = mdash();
        c.env_remove("MACHDASH_USER")
            .env_remove("MACHDASH_PASSWORD")
            .arg("--config")
            .arg(&self.config)
            .arg("--db")
            .arg(&self.db)
            .args(["--user", user, "--password", password]);
        c
    }

    /// Absolute path of an output file inside the temp dir.
    pub fn out(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().to_string()
    }
}
