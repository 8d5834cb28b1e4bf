//! Text charts for the two dashboard series.

use crate::core::performance::DailyRow;
use crate::utils::colors::{BLUE, GREEN, RED, RESET, colorize_optional};
use crate::utils::formatting::{GAP, fmt_optional};
use crate::utils::table::{Column, Table};

pub const BAR_WIDTH: usize = 40;

/// Horizontal bar per day, scaled to the largest value.
pub fn bar_chart(points: &[(u32, f64)], unit: &str) -> String {
    let max = points
        .iter()
        .map(|(_, v)| *v)
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    for (day, value) in points {
        let len = if max > 0.0 && *value > 0.0 {
            ((value / max) * BAR_WIDTH as f64).round().max(1.0) as usize
        } else {
            0
        };
        out.push_str(&format!(
            " {day:>2} │{BLUE}{}{RESET}{} {value:.1} {unit}\n",
            "█".repeat(len),
            " ".repeat(BAR_WIDTH - len.min(BAR_WIDTH)),
        ));
    }
    out
}

/// Day / real / ideal / deviation table. Missing values show as gaps.
pub fn rate_table(rows: &[DailyRow]) -> String {
    let mut table = Table::new(vec![
        Column::right("Day"),
        Column::right("Real"),
        Column::right("Ideal"),
        Column::right("Real - Ideal"),
    ]);

    for r in rows {
        let delta = match (r.real_rate, r.ideal_rate) {
            (Some(real), Some(ideal)) => {
                let d = real - ideal;
                let colour = if d > 0.0 { RED } else { GREEN };
                format!("{colour}{d:+.2}{RESET}")
            }
            _ => colorize_optional(GAP),
        };

        table.add_row(vec![
            format!("{:02}", r.day),
            colorize_optional(&fmt_optional(r.real_rate)),
            colorize_optional(&fmt_optional(r.ideal_rate)),
            delta,
        ]);
    }

    table.render()
}
