use crate::errors::{AppError, AppResult};
use crate::source::SheetNames;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One allow-list entry. `password_hash` is an argon2 PHC string
/// (`$argon2id$v=19$...`), produced by `machdash hash-password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Audit log database.
    pub database: String,
    /// Workbook location: http(s) URL, `file://` URL or local path.
    #[serde(default)]
    pub workbook_url: String,
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
    #[serde(default)]
    pub sheets: SheetNames,
    #[serde(default)]
    pub users: Vec<UserEntry>,
}

fn default_fetch_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            workbook_url: String::new(),
            fetch_timeout_secs: default_fetch_timeout(),
            sheets: SheetNames::default(),
            users: Vec::new(),
        }
    }
}

impl Config {
    /// Standard configuration directory: `~/.machdash`
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".machdash")
    }

    /// Full path of the default config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("machdash.conf")
    }

    /// Full path of the default audit database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("machdash.sqlite")
    }

    /// Config file to use: the `--config` override or the standard one.
    pub fn resolve_path(custom: Option<&str>) -> PathBuf {
        custom
            .map(expand_tilde)
            .unwrap_or_else(Self::config_file)
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))
    }

    /// Write this configuration as YAML, creating the parent directory.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| AppError::Config(format!("cannot serialize configuration: {e}")))?;
        fs::write(path, yaml)?;
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(1))
    }

    /// The workbook location, or a configuration error when none is set.
    pub fn workbook_location(&self) -> AppResult<&str> {
        let url = self.workbook_url.trim();
        if url.is_empty() {
            return Err(AppError::Config(
                "no workbook configured: set `workbook_url` or pass --source".into(),
            ));
        }
        Ok(url)
    }
}
