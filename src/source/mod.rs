//! Data source adapter: where the workbook comes from and how it becomes a [`Dataset`].

pub mod file;
pub mod http;
pub mod tables;
pub mod xlsx;

use crate::errors::AppResult;
use crate::models::Dataset;
use std::time::Duration;

pub use file::FileSource;
pub use http::HttpSource;
pub use tables::SheetNames;
pub use xlsx::{Cell, RawWorkbook, Sheet};

/// A place a workbook can be fetched from.
pub trait DataSource {
    /// Fetch identifier, used as the session cache key.
    fn key(&self) -> &str;

    /// Download (or read) the raw workbook bytes.
    fn fetch(&self) -> AppResult<Vec<u8>>;
}

/// Build the source for a configured location.
///
/// `http://` and `https://` go through [`HttpSource`]; everything else,
/// including `file://` URLs, is read from disk.
pub fn open(location: &str, timeout: Duration) -> AppResult<Box<dyn DataSource>> {
    let lower = location.trim().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location.trim(), timeout)?))
    } else {
        Ok(Box::new(FileSource::new(location.trim())))
    }
}

/// Fetch, unzip and type-check the three tables.
pub fn load(source: &dyn DataSource, sheets: &SheetNames) -> AppResult<Dataset> {
    let bytes = source.fetch()?;
    let workbook = RawWorkbook::from_bytes(&bytes)?;
    tables::load_dataset(&workbook, sheets)
}
