//! Terminal rendering of a [`DashboardView`].

use super::chart::{bar_chart, rate_table};
use super::messages::{header, info_line, warning_line};
use crate::core::logic::{DashboardView, FleetRow};
use crate::utils::colors::{GREY, RESET, color_for_remaining, color_for_status};
use crate::utils::formatting::{GAP, bold, fmt_hours};
use crate::utils::table::{Column, Table};

pub const NO_DATA: &str = "No data for the selected filters.";

const SEPARATOR_WIDTH: usize = 60;

fn separator() -> String {
    format!("{GREY}{}{RESET}", "─".repeat(SEPARATOR_WIDTH))
}

/// The four headline metrics.
fn metrics(view: &DashboardView) -> String {
    let mut table = Table::new(vec![
        Column::left("Machine"),
        Column::left("Machine name"),
        Column::right("Hours to next service"),
        Column::left("Maintenance status"),
    ]);

    let (remaining, status) = match &view.maintenance {
        Some(m) => (
            format!(
                "{}{}{RESET}",
                color_for_remaining(m.hours_remaining),
                fmt_hours(m.hours_remaining)
            ),
            format!(
                "{} {}{}{RESET}",
                m.status.symbol(),
                color_for_status(m.status),
                m.status.label()
            ),
        ),
        None => (GAP.to_string(), GAP.to_string()),
    };

    let name = if view.machine_name.is_empty() {
        GAP.to_string()
    } else {
        view.machine_name.clone()
    };

    table.add_row(vec![view.machine_id.clone(), name, remaining, status]);
    table.render()
}

fn filters(view: &DashboardView) -> String {
    let mut out = String::new();

    let month = view
        .month
        .map(|m| m.to_string())
        .unwrap_or_else(|| GAP.to_string());
    let months: Vec<String> = view.available_months.iter().map(|m| m.to_string()).collect();
    out.push_str(&format!(
        "Month: {}   (available: {})\n",
        bold(&month),
        if months.is_empty() {
            GAP.to_string()
        } else {
            months.join(", ")
        }
    ));

    if view.sites.is_empty() {
        out.push_str(&format!("Work-sites: {GAP}\n"));
    } else {
        let boxes: Vec<String> = view
            .sites
            .iter()
            .map(|s| format!("[{}] {}", if s.checked { "x" } else { " " }, s.site))
            .collect();
        let joined = boxes.join("  ");
        let wrapped = textwrap::wrap(&joined, SEPARATOR_WIDTH);
        out.push_str("Work-sites: ");
        out.push_str(&wrapped.join("\n            "));
        out.push('\n');
    }

    out
}

/// Full dashboard for one selection.
pub fn render(view: &DashboardView) -> String {
    let mut out = String::new();

    out.push_str(&header("Machinery dashboard"));
    out.push_str("\n\n");
    out.push_str(&metrics(view));

    if let Some(m) = &view.maintenance {
        out.push_str(&format!(
            "{GREY}Current horometer: {} h | hours since service: {} h | interval: {} h{RESET}\n",
            fmt_hours(m.current_horometer),
            fmt_hours(m.hours_since_service),
            fmt_hours(m.baseline.service_interval_hours)
        ));
    }
    for note in &view.notes {
        out.push_str(&warning_line(note));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&filters(view));
    out.push_str(&separator());
    out.push('\n');

    out.push_str(&bold("Daily fuel consumption (liters)"));
    out.push('\n');
    if view.has_data() {
        let points: Vec<(u32, f64)> = view
            .series
            .fuel_liters
            .iter()
            .map(|(d, v)| (*d, *v))
            .collect();
        out.push_str(&bar_chart(&points, "L"));
        out.push_str(&format!("     total: {:.1} L\n", view.series.total_fuel()));
    } else {
        out.push_str(&info_line(NO_DATA));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&bold("Daily throughput: real vs ideal (L/h)"));
    out.push('\n');
    if view.has_data() {
        out.push_str(&rate_table(&view.series.rows()));
    } else {
        out.push_str(&info_line(NO_DATA));
        out.push('\n');
    }

    out.push_str(&separator());
    out.push('\n');
    let updated = view
        .last_update
        .map(|d| d.to_string())
        .unwrap_or_else(|| GAP.to_string());
    out.push_str(&format!("{GREY}Data updated to: {updated}{RESET}\n"));

    out
}

/// One line per machine with its maintenance light.
pub fn render_fleet(rows: &[FleetRow]) -> String {
    let mut table = Table::new(vec![
        Column::left("Machine"),
        Column::left("Name"),
        Column::right("Horometer"),
        Column::right("Hours left"),
        Column::left("Status"),
    ]);

    for r in rows {
        let (horometer, remaining, status) = match &r.maintenance {
            Some(m) => (
                fmt_hours(m.current_horometer),
                format!(
                    "{}{}{RESET}",
                    color_for_remaining(m.hours_remaining),
                    fmt_hours(m.hours_remaining)
                ),
                format!(
                    "{} {}{}{RESET}{}",
                    m.status.symbol(),
                    color_for_status(m.status),
                    m.status.label(),
                    if m.baseline.uses_default() {
                        " (default interval)"
                    } else {
                        ""
                    }
                ),
            ),
            None => (GAP.to_string(), GAP.to_string(), "no data".to_string()),
        };

        table.add_row(vec![
            r.machine_id.clone(),
            r.machine_name.clone(),
            horometer,
            remaining,
            status,
        ]);
    }

    table.render()
}
