use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

/// One row of the operations sheet: a machine, a day and a work-site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationalRecord {
    pub machine_id: String,
    pub machine_name: String,
    pub date: NaiveDate,
    /// Cumulative operating hours at the end of the entry.
    pub horometer_end: Option<f64>,
    pub fuel_liters: Option<f64>,
    pub work_site: Option<String>,
    /// Liters/hour or hours/hour, depending on the machine's unit.
    pub throughput_rate: Option<f64>,
}

impl OperationalRecord {
    /// Work-site with blank values folded into `None`.
    pub fn site(&self) -> Option<&str> {
        self.work_site
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Orders machine ids numerically when both are numbers ("2" < "10"),
/// lexicographically otherwise.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
