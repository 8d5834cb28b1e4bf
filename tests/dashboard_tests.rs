mod common;
use common::standard_workbook;

use machdash::core::filter::{SiteSelection, resolve, select_sites};
use machdash::core::logic::{Core, DashboardQuery};
use machdash::core::maintenance::MaintenanceStatus;
use machdash::errors::AppError;
use machdash::models::{Dataset, Month};
use machdash::source::tables::load_dataset;
use machdash::source::{RawWorkbook, SheetNames};
use machdash::ui::dashboard::{NO_DATA, render, render_fleet};

fn dataset() -> Dataset {
    let wb = RawWorkbook::from_bytes(&standard_workbook()).expect("read workbook");
    load_dataset(&wb, &SheetNames::default()).expect("dataset")
}

fn june() -> Month {
    "2025-06".parse().unwrap()
}

#[test]
fn test_resolve_narrows_machine_and_month() {
    let ds = dataset();
    let r = resolve(&ds.operations, "12", june());

    assert_eq!(r.machine_records.len(), 4);
    assert_eq!(r.month_records.len(), 3);
    assert_eq!(r.available_months, vec!["2025-05".parse().unwrap(), june()]);
    assert_eq!(r.available_sites, vec!["Norte", "Sur"]);
}

#[test]
fn test_resolve_is_idempotent() {
    let ds = dataset();
    assert_eq!(
        resolve(&ds.operations, "12", june()),
        resolve(&ds.operations, "12", june())
    );
}

#[test]
fn test_unknown_machine_resolves_empty() {
    let ds = dataset();
    let r = resolve(&ds.operations, "404", june());
    assert!(r.machine_records.is_empty());
    assert!(r.available_sites.is_empty());
}

#[test]
fn test_zero_selected_sites_is_empty() {
    let ds = dataset();
    let r = resolve(&ds.operations, "12", june());
    let none: [&str; 0] = [];
    assert!(select_sites(&r.month_records, &none).is_empty());
    assert_eq!(select_sites(&r.month_records, &["Sur"]).len(), 2);
}

#[test]
fn test_site_toggle() {
    let mut sel = SiteSelection::all();
    assert!(sel.is_checked("Norte"));
    assert!(!sel.toggle("Norte"));
    assert!(!sel.is_checked("Norte"));
    assert_eq!(sel.selected(&["Norte".into(), "Sur".into()]), vec!["Sur"]);
    assert!(sel.toggle("Norte"));
}

#[test]
fn test_defaults_first_machine_and_latest_month() {
    let ds = dataset();
    let view = Core::build_dashboard(&ds, &DashboardQuery::default()).expect("view");

    assert_eq!(view.machine_id, "3");
    assert_eq!(view.month, Some(june()));
    assert!(view.notes.iter().any(|n| n.contains("default interval of 500 h")));
    assert_eq!(view.maintenance.map(|m| m.status), Some(MaintenanceStatus::Ok));
}

#[test]
fn test_machine_twelve_is_due_soon() {
    let ds = dataset();
    let query = DashboardQuery {
        machine: Some("12".into()),
        ..DashboardQuery::default()
    };
    let view = Core::build_dashboard(&ds, &query).expect("view");

    let m = view.maintenance.expect("maintenance");
    assert_eq!(m.hours_remaining, 50.0);
    assert_eq!(m.status, MaintenanceStatus::DueSoon);
    assert_eq!(view.machine_name, "Excavator CAT 320");
    assert_eq!(view.series.fuel_liters.get(&2), Some(&200.0));
    assert_eq!(view.series.real_rate.get(&2), Some(&Some(10.5)));
    assert_eq!(view.series.ideal_rate.get(&2), Some(&Some(9.0)));

    let out = render(&view);
    assert!(out.contains("DUE_SOON"));
    assert!(out.contains("[x] Norte"));
    assert!(out.contains("Data updated to: 2025-06-05"));
}

#[test]
fn test_site_filter_does_not_touch_maintenance() {
    let ds = dataset();
    let query = DashboardQuery {
        machine: Some("12".into()),
        month: Some(june()),
        sites: SiteSelection::excluding(["Sur"]),
    };
    let view = Core::build_dashboard(&ds, &query).expect("view");

    assert_eq!(view.series.rows().len(), 1);
    assert_eq!(view.series.fuel_liters.get(&2), Some(&120.0));
    assert_eq!(view.maintenance.map(|m| m.current_horometer), Some(1450.0));
    assert!(view.sites.iter().any(|s| s.site == "Sur" && !s.checked));
}

#[test]
fn test_month_without_data_renders_no_data() {
    let ds = dataset();
    let query = DashboardQuery {
        machine: Some("12".into()),
        month: Some("2024-01".parse().unwrap()),
        ..DashboardQuery::default()
    };
    let view = Core::build_dashboard(&ds, &query).expect("view");

    assert!(!view.has_data());
    assert_eq!(view.machine_name, "Excavator CAT 320");
    assert!(render(&view).contains(NO_DATA));
}

#[test]
fn test_unknown_machine_is_an_error() {
    let ds = dataset();
    let query = DashboardQuery {
        machine: Some("404".into()),
        ..DashboardQuery::default()
    };
    let err = Core::build_dashboard(&ds, &query).unwrap_err();
    assert!(matches!(err, AppError::UnknownMachine(_)));
}

#[test]
fn test_invalid_month_text() {
    assert!(matches!(
        "2025-13".parse::<Month>(),
        Err(AppError::InvalidMonth(_))
    ));
    assert_eq!(june().to_string(), "2025-06");
}

#[test]
fn test_fleet_overview() {
    let ds = dataset();
    let fleet = Core::fleet(&ds);

    let ids: Vec<&str> = fleet.iter().map(|r| r.machine_id.as_str()).collect();
    assert_eq!(ids, vec!["3", "7", "12"]);
    assert_eq!(
        fleet[1].maintenance.map(|m| m.status),
        Some(MaintenanceStatus::Overdue)
    );

    let out = render_fleet(&fleet);
    assert!(out.contains("OVERDUE"));
    assert!(out.contains("(default interval)"));
}
