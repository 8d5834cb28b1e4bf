use crate::utils::colors::{BLUE, BOLD, GREEN, RED, RESET, YELLOW};
use std::fmt;

#[derive(Clone, Copy)]
enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

impl Tone {
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Tone::Info => (BLUE, "ℹ️"),
            Tone::Success => (GREEN, "✅"),
            Tone::Warning => (YELLOW, "⚠️"),
            Tone::Error => (RED, "❌"),
        }
    }
}

fn line<T: fmt::Display>(tone: Tone, msg: T) -> String {
    let (colour, icon) = tone.style();
    format!("{colour}{BOLD}{icon} {RESET}{msg}")
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", line(Tone::Info, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", line(Tone::Success, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", line(Tone::Warning, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", line(Tone::Error, msg));
}

/// Formatted section header
pub fn header<T: fmt::Display>(msg: T) -> String {
    format!("{BLUE}{BOLD}══════ {msg} ══════{RESET}")
}

/// Same as [`warning`], returned instead of printed.
pub fn warning_line<T: fmt::Display>(msg: T) -> String {
    line(Tone::Warning, msg)
}

/// Same as [`info`], returned instead of printed.
pub fn info_line<T: fmt::Display>(msg: T) -> String {
    line(Tone::Info, msg)
}
