use serde::Serialize;
use std::collections::HashMap;

/// Expected throughput for a work-site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkSiteReference {
    pub work_site: String,
    pub ideal_rate: f64,
}

/// Lookup table over the work-site sheet.
///
/// When a site is listed twice the first row wins.
#[derive(Debug, Clone, Default)]
pub struct WorkSiteTable {
    rows: Vec<WorkSiteReference>,
    index: HashMap<String, usize>,
}

impl WorkSiteTable {
    pub fn new(rows: Vec<WorkSiteReference>) -> Self {
        let mut index = HashMap::new();
        for (i, r) in rows.iter().enumerate() {
            index.entry(r.work_site.trim().to_string()).or_insert(i);
        }
        Self { rows, index }
    }

    /// Ideal rate for `site`, `None` when the site has no reference row.
    pub fn ideal_rate(&self, site: &str) -> Option<f64> {
        self.index.get(site.trim()).map(|&i| self.rows[i].ideal_rate)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
