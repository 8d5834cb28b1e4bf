use chrono::NaiveDate;
use machdash::core::performance::aggregate;
use machdash::models::{OperationalRecord, WorkSiteReference, WorkSiteTable};

fn rec(day: u32, fuel: Option<f64>, site: Option<&str>, rate: Option<f64>) -> OperationalRecord {
    OperationalRecord {
        machine_id: "12".into(),
        machine_name: "Excavator".into(),
        date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
        horometer_end: None,
        fuel_liters: fuel,
        work_site: site.map(str::to_string),
        throughput_rate: rate,
    }
}

fn reference() -> WorkSiteTable {
    WorkSiteTable::new(vec![
        WorkSiteReference {
            work_site: "Norte".into(),
            ideal_rate: 10.0,
        },
        WorkSiteReference {
            work_site: "Sur".into(),
            ideal_rate: 8.0,
        },
        // duplicate: first row wins
        WorkSiteReference {
            work_site: "Norte".into(),
            ideal_rate: 99.0,
        },
    ])
}

#[test]
fn test_daily_sums_and_means() {
    let rows = [
        rec(2, Some(120.0), Some("Norte"), Some(12.0)),
        rec(2, Some(80.0), Some("Sur"), Some(9.0)),
        rec(5, Some(150.0), Some("Sur"), Some(10.0)),
    ];
    let refs: Vec<&OperationalRecord> = rows.iter().collect();

    let series = aggregate(&refs, &reference());

    assert_eq!(series.fuel_liters.get(&2), Some(&200.0));
    assert_eq!(series.fuel_liters.get(&5), Some(&150.0));
    assert_eq!(series.real_rate.get(&2), Some(&Some(10.5)));
    assert_eq!(series.ideal_rate.get(&2), Some(&Some(9.0)));
    assert_eq!(series.ideal_rate.get(&5), Some(&Some(8.0)));
    assert_eq!(series.total_fuel(), 350.0);
}

#[test]
fn test_result_does_not_depend_on_row_order() {
    let rows = [
        rec(1, Some(0.1), Some("Norte"), Some(1.1)),
        rec(1, Some(0.2), Some("Sur"), Some(2.2)),
        rec(1, Some(0.3), Some("Norte"), Some(3.3)),
        rec(9, Some(1e16), Some("Sur"), None),
        rec(9, Some(1.0), Some("Sur"), Some(4.0)),
        rec(9, Some(-1e16), Some("Norte"), Some(5.0)),
    ];

    let forward: Vec<&OperationalRecord> = rows.iter().collect();
    let backward: Vec<&OperationalRecord> = rows.iter().rev().collect();
    let shuffled: Vec<&OperationalRecord> = [3, 0, 5, 1, 4, 2].iter().map(|&i| &rows[i]).collect();

    let a = aggregate(&forward, &reference());
    assert_eq!(a, aggregate(&backward, &reference()));
    assert_eq!(a, aggregate(&shuffled, &reference()));
}

#[test]
fn test_site_without_reference_is_a_gap_not_zero() {
    let rows = [rec(4, Some(50.0), Some("Centro"), None)];
    let refs: Vec<&OperationalRecord> = rows.iter().collect();

    let series = aggregate(&refs, &reference());

    assert_eq!(series.fuel_liters.get(&4), Some(&50.0));
    assert_eq!(series.real_rate.get(&4), Some(&None));
    assert_eq!(series.ideal_rate.get(&4), Some(&None));
}

#[test]
fn test_missing_ideal_does_not_pull_the_mean_down() {
    let rows = [
        rec(7, Some(10.0), Some("Norte"), Some(10.0)),
        rec(7, Some(10.0), Some("Centro"), Some(20.0)),
    ];
    let refs: Vec<&OperationalRecord> = rows.iter().collect();

    let series = aggregate(&refs, &reference());
    assert_eq!(series.ideal_rate.get(&7), Some(&Some(10.0)));
    assert_eq!(series.real_rate.get(&7), Some(&Some(15.0)));
}

#[test]
fn test_empty_input_gives_empty_series() {
    let series = aggregate(&[], &reference());
    assert!(series.is_empty());
    assert!(series.rows().is_empty());
    assert_eq!(series.total_fuel(), 0.0);
}

#[test]
fn test_rows_are_sorted_by_day() {
    let rows = [
        rec(20, Some(1.0), Some("Norte"), None),
        rec(3, Some(2.0), Some("Norte"), None),
        rec(11, None, Some("Sur"), None),
    ];
    let refs: Vec<&OperationalRecord> = rows.iter().collect();

    let days: Vec<u32> = aggregate(&refs, &reference()).rows().iter().map(|r| r.day).collect();
    assert_eq!(days, vec![3, 11, 20]);
}
