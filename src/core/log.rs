use crate::db::log::{LogEntry, load_entries};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::formatting::strip_ansi;
use ansi_term::Colour;

const OP_COLUMN_MAX: usize = 40;
const MESSAGE_WIDTH: usize = 72;

/// ANSI colour for an audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "login" => Colour::Green,
        "login_failed" => Colour::Red,
        "fetch" => Colour::Blue,
        "refresh" => Colour::Yellow,
        "export" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Print the internal audit log, oldest first.
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries = load_entries(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        println!("📜 Internal log:\n");
        for line in Self::format_entries(&entries) {
            println!("{line}");
        }
        Ok(())
    }

    /// One coloured line per entry; long messages wrap under the message column.
    pub fn format_entries(entries: &[LogEntry]) -> Vec<String> {
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        let op_labels: Vec<String> = entries
            .iter()
            .map(|e| {
                let colour = color_for_operation(&e.operation);
                let mut label = colour.paint(e.operation.as_str()).to_string();
                if !e.target.is_empty() {
                    label.push_str(&format!(" ({})", e.target));
                }
                label
            })
            .collect();

        let op_w = op_labels
            .iter()
            .map(|l| strip_ansi(l).chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_COLUMN_MAX);

        let indent = " ".repeat(id_w + 2 + date_w + 3 + op_w + 4);

        entries
            .iter()
            .zip(op_labels)
            .map(|(e, label)| {
                let visible = strip_ansi(&label).chars().count();
                let label = if visible > OP_COLUMN_MAX {
                    // truncation drops the colour, the width matters more
                    let mut s: String = strip_ansi(&label).chars().take(OP_COLUMN_MAX - 3).collect();
                    s.push_str("...");
                    s
                } else {
                    label
                };
                let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&label).chars().count()));

                let wrapped = textwrap::wrap(&e.message, MESSAGE_WIDTH);
                let mut message = wrapped.first().map(|l| l.to_string()).unwrap_or_default();
                for l in wrapped.iter().skip(1) {
                    message.push('\n');
                    message.push_str(&indent);
                    message.push_str(l);
                }

                format!(
                    "{:>id_w$}: {:<date_w$} | {}{} => {}",
                    e.id,
                    e.date,
                    label,
                    padding,
                    message,
                    id_w = id_w,
                    date_w = date_w
                )
            })
            .collect()
    }
}
