//! ANSI colour helpers for terminal output.

use crate::core::maintenance::MaintenanceStatus;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";

pub fn color_for_status(status: MaintenanceStatus) -> &'static str {
    match status {
        MaintenanceStatus::Overdue => RED,
        MaintenanceStatus::DueSoon => YELLOW,
        MaintenanceStatus::Ok => GREEN,
    }
}

/// Hours-remaining colour: red once the service is overdue.
pub fn color_for_remaining(hours: f64) -> &'static str {
    color_for_status(MaintenanceStatus::classify(hours))
}

/// Grey out placeholders such as `--`.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
