use crate::models::Dataset;
use chrono::{DateTime, Local};

/// A loaded workbook and the fetch it came from.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: String,
    pub fetched_at: DateTime<Local>,
    pub dataset: Dataset,
}

/// Single-entry workbook cache keyed by fetch identifier.
///
/// Storing under a new key replaces the previous entry.
#[derive(Debug, Default)]
pub struct WorkbookCache {
    entry: Option<CacheEntry>,
}

impl WorkbookCache {
    pub fn is_cached(&self, key: &str) -> bool {
        self.entry.as_ref().is_some_and(|e| e.key == key)
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entry.as_ref().filter(|e| e.key == key)
    }

    pub fn store(&mut self, key: &str, dataset: Dataset) {
        self.entry = Some(CacheEntry {
            key: key.to_string(),
            fetched_at: Local::now(),
            dataset,
        });
    }

    /// Returns whether something was dropped.
    pub fn invalidate(&mut self) -> bool {
        self.entry.take().is_some()
    }
}
