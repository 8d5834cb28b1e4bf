//! Path utilities: expand ~, validate absolute output paths.

use crate::errors::{AppError, AppResult};
use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Export targets must be absolute so the file never lands in a surprising cwd.
pub fn require_absolute(path: &str) -> AppResult<PathBuf> {
    let p = expand_tilde(path);
    if !Path::new(&p).is_absolute() {
        return Err(AppError::Export(format!(
            "output file path must be absolute: {path}"
        )));
    }
    Ok(p)
}
