//! Unified application error type.
//! All modules (source, core, session, db, cli) return AppError so that
//! fatal conditions reach `main` through a single path.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Audit database
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Data source
    // ---------------------------
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Data source answered with HTTP {status} for {url}")]
    FetchStatus { status: u16, url: String },

    #[error("Workbook archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Workbook XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid workbook: {0}")]
    Workbook(String),

    #[error("Schema error: sheet '{sheet}' is missing")]
    MissingSheet { sheet: String },

    #[error("Schema error: sheet '{sheet}' has no column '{column}'")]
    MissingColumn { sheet: String, column: String },

    // ---------------------------
    // Input / selection errors
    // ---------------------------
    #[error("Invalid month (expected YYYY-MM): {0}")]
    InvalidMonth(String),

    #[error("Unknown machine: {0}")]
    UnknownMachine(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    // ---------------------------
    // Authentication
    // ---------------------------
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Data source and schema failures: nothing can be rendered after them,
    /// so an interactive session ends.
    pub fn ends_session(&self) -> bool {
        matches!(
            self,
            AppError::Fetch(_)
                | AppError::FetchStatus { .. }
                | AppError::Zip(_)
                | AppError::Xml(_)
                | AppError::Workbook(_)
                | AppError::MissingSheet { .. }
                | AppError::MissingColumn { .. }
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
