//! Filter resolver: machine → months → work-sites → selected records.

use crate::models::{Month, OperationalRecord};
use serde::Serialize;
use std::collections::BTreeSet;

/// Result of narrowing the operations table to one machine and one month.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'a> {
    /// Every record of the machine, regardless of month.
    pub machine_records: Vec<&'a OperationalRecord>,
    /// Months with data for the machine, ascending.
    pub available_months: Vec<Month>,
    /// Records of the machine inside the chosen month.
    pub month_records: Vec<&'a OperationalRecord>,
    /// Distinct non-blank work-sites of `month_records`, sorted.
    pub available_sites: Vec<String>,
}

pub fn records_for_machine<'a>(
    records: &'a [OperationalRecord],
    machine_id: &str,
) -> Vec<&'a OperationalRecord> {
    records.iter().filter(|r| r.machine_id == machine_id).collect()
}

pub fn available_months(records: &[&OperationalRecord]) -> Vec<Month> {
    records
        .iter()
        .map(|r| Month::of(r.date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn available_sites(records: &[&OperationalRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.site())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Narrow `records` to `machine_id` and `month`.
///
/// An unknown machine simply resolves to empty sets.
pub fn resolve<'a>(
    records: &'a [OperationalRecord],
    machine_id: &str,
    month: Month,
) -> Resolution<'a> {
    let machine_records = records_for_machine(records, machine_id);
    let available_months = available_months(&machine_records);

    let month_records: Vec<&OperationalRecord> = machine_records
        .iter()
        .copied()
        .filter(|r| month.contains(r.date))
        .collect();

    let available_sites = available_sites(&month_records);

    Resolution {
        machine_records,
        available_months,
        month_records,
        available_sites,
    }
}

/// Keep the records whose work-site is in `selected`.
///
/// Zero selected sites gives an empty result. Records without a site never
/// match.
pub fn select_sites<'a, S: AsRef<str>>(
    records: &[&'a OperationalRecord],
    selected: &[S],
) -> Vec<&'a OperationalRecord> {
    let wanted: BTreeSet<&str> = selected.iter().map(|s| s.as_ref().trim()).collect();
    records
        .iter()
        .copied()
        .filter(|r| r.site().is_some_and(|s| wanted.contains(s)))
        .collect()
}

/// Check state of the work-site boxes: every site starts checked and the
/// user unchecks the ones to hide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteSelection {
    excluded: BTreeSet<String>,
}

impl SiteSelection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn excluding<I, S>(sites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            excluded: sites
                .into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .collect(),
        }
    }

    pub fn is_checked(&self, site: &str) -> bool {
        !self.excluded.contains(site.trim())
    }

    /// Flip one box; returns the new state.
    pub fn toggle(&mut self, site: &str) -> bool {
        let site = site.trim().to_string();
        if self.excluded.remove(&site) {
            true
        } else {
            self.excluded.insert(site);
            false
        }
    }

    /// The checked subset of `available`.
    pub fn selected(&self, available: &[String]) -> Vec<String> {
        available
            .iter()
            .filter(|s| self.is_checked(s))
            .cloned()
            .collect()
    }
}
