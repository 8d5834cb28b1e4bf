//! Performance aggregator: daily fuel totals and real vs. ideal throughput.

use crate::models::{OperationalRecord, WorkSiteTable};
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per day-of-month series. `None` marks a day whose values were all
/// missing; it renders as a gap, never as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailySeries {
    pub fuel_liters: BTreeMap<u32, f64>,
    pub real_rate: BTreeMap<u32, Option<f64>>,
    pub ideal_rate: BTreeMap<u32, Option<f64>>,
}

/// One day of [`DailySeries`], flattened for tables and exports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyRow {
    pub day: u32,
    pub fuel_liters: f64,
    pub real_rate: Option<f64>,
    pub ideal_rate: Option<f64>,
}

impl DailySeries {
    pub fn is_empty(&self) -> bool {
        self.fuel_liters.is_empty()
    }

    pub fn rows(&self) -> Vec<DailyRow> {
        self.fuel_liters
            .iter()
            .map(|(&day, &fuel)| DailyRow {
                day,
                fuel_liters: fuel,
                real_rate: self.real_rate.get(&day).copied().flatten(),
                ideal_rate: self.ideal_rate.get(&day).copied().flatten(),
            })
            .collect()
    }

    pub fn total_fuel(&self) -> f64 {
        canonical_sum(self.fuel_liters.values().copied().collect())
    }
}

#[derive(Default)]
struct DayBucket {
    fuel: Vec<f64>,
    real: Vec<f64>,
    ideal: Vec<f64>,
}

/// Group `records` by day of month.
///
/// Missing values are skipped, so a record whose work-site has no reference
/// row does not pull the ideal mean towards zero. Sums are taken in a fixed
/// order, which makes the output independent of the input row order.
pub fn aggregate(records: &[&OperationalRecord], reference: &WorkSiteTable) -> DailySeries {
    let mut buckets: BTreeMap<u32, DayBucket> = BTreeMap::new();

    for r in records {
        let bucket = buckets.entry(r.date.day()).or_default();
        if let Some(f) = r.fuel_liters {
            bucket.fuel.push(f);
        }
        if let Some(rate) = r.throughput_rate {
            bucket.real.push(rate);
        }
        if let Some(ideal) = r.site().and_then(|s| reference.ideal_rate(s)) {
            bucket.ideal.push(ideal);
        }
    }

    let mut series = DailySeries::default();
    for (day, b) in buckets {
        series.fuel_liters.insert(day, canonical_sum(b.fuel));
        series.real_rate.insert(day, mean(b.real));
        series.ideal_rate.insert(day, mean(b.ideal));
    }
    series
}

fn canonical_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.iter().sum()
}

fn mean(values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    Some(canonical_sum(values) / n)
}
