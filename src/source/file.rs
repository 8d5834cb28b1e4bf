use super::DataSource;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Workbook stored on the local filesystem.
pub struct FileSource {
    key: String,
    path: PathBuf,
}

impl FileSource {
    pub fn new(location: &str) -> Self {
        let raw = location.strip_prefix("file://").unwrap_or(location);
        Self {
            key: location.to_string(),
            path: expand_tilde(raw),
        }
    }
}

impl DataSource for FileSource {
    fn key(&self) -> &str {
        &self.key
    }

    fn fetch(&self) -> AppResult<Vec<u8>> {
        fs::read(&self.path).map_err(|e| {
            AppError::from(io::Error::new(
                e.kind(),
                format!("cannot read workbook {}: {e}", self.path.display()),
            ))
        })
    }
}
