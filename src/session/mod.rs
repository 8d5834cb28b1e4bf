//! Explicit session context: who logged in, where the workbook comes from,
//! and the memoized copy of it.

pub mod auth;
pub mod cache;

use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::Dataset;
use crate::source::{self, DataSource, SheetNames};

pub use auth::{CredentialGate, hash_password};
pub use cache::{CacheEntry, WorkbookCache};

pub struct Session {
    user: String,
    source: Box<dyn DataSource>,
    sheets: SheetNames,
    cache: WorkbookCache,
    audit: Option<DbPool>,
}

impl Session {
    /// Check the credentials and open a session. A rejection leaves no session
    /// behind.
    pub fn login(
        gate: &CredentialGate,
        username: &str,
        password: &str,
        source: Box<dyn DataSource>,
        sheets: SheetNames,
        audit: Option<DbPool>,
    ) -> AppResult<Self> {
        let username = username.trim();

        if !gate.verify(username, password) {
            audit_line(audit.as_ref(), "login_failed", username, "rejected credentials");
            return Err(AppError::InvalidCredentials);
        }

        audit_line(audit.as_ref(), "login", username, "session opened");

        Ok(Self {
            user: username.to_string(),
            source,
            sheets,
            cache: WorkbookCache::default(),
            audit,
        })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn source_key(&self) -> &str {
        self.source.key()
    }

    pub fn cache(&self) -> &WorkbookCache {
        &self.cache
    }

    /// The session's tables, fetched on first use and memoized afterwards.
    pub fn dataset(&mut self) -> AppResult<&Dataset> {
        let key = self.source.key().to_string();

        if !self.cache.is_cached(&key) {
            let loaded = source::load(self.source.as_ref(), &self.sheets);
            let dataset = match loaded {
                Ok(d) => d,
                Err(e) => {
                    audit_line(self.audit.as_ref(), "fetch_failed", &key, &e.to_string());
                    return Err(e);
                }
            };

            audit_line(
                self.audit.as_ref(),
                "fetch",
                &key,
                &format!(
                    "{} operational, {} maintenance, {} work-site rows loaded for {}",
                    dataset.operations.len(),
                    dataset.maintenance.len(),
                    dataset.work_sites.len(),
                    self.user
                ),
            );
            self.cache.store(&key, dataset);
        }

        self.cache
            .get(&key)
            .map(|entry| &entry.dataset)
            .ok_or_else(|| AppError::Other("workbook cache is empty after load".into()))
    }

    /// Drop the cached workbook and fetch it again.
    pub fn refresh(&mut self) -> AppResult<&Dataset> {
        if self.cache.invalidate() {
            audit_line(self.audit.as_ref(), "refresh", self.source.key(), "cache invalidated");
        }
        self.dataset()
    }

    /// Record an operation in the audit log, if one is attached.
    pub fn audit(&self, operation: &str, target: &str, message: &str) {
        audit_line(self.audit.as_ref(), operation, target, message);
    }
}

fn audit_line(pool: Option<&DbPool>, operation: &str, target: &str, message: &str) {
    if let Some(pool) = pool {
        ttlog_quiet(&pool.conn, operation, target, message);
    }
}
