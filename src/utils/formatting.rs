//! Formatting utilities used for CLI and export outputs.

use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

pub const GAP: &str = "--";

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

static ANSI_ESCAPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok());

/// Drop ANSI colour sequences, leaving the visible text.
pub fn strip_ansi(s: &str) -> String {
    match ANSI_ESCAPE.as_ref() {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    }
}

/// Visible width, ignoring ANSI escape sequences.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(s));
    format!("{s}{}", " ".repeat(pad))
}

pub fn pad_left(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(s));
    format!("{}{s}", " ".repeat(pad))
}

/// Whole hours, keeping the sign: `-100`, `20`.
pub fn fmt_hours(h: f64) -> String {
    format!("{:.0}", h)
}

/// Two decimals, or the gap marker for missing values.
pub fn fmt_optional(v: Option<f64>) -> String {
    match v {
        Some(x) => format!("{:.2}", x),
        None => GAP.to_string(),
    }
}
