//! Table rendering utilities for CLI outputs.

use super::formatting::{display_width, pad_left, pad_right};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

pub struct Column {
    pub header: String,
    pub align: Align,
}

impl Column {
    pub fn left(header: &str) -> Self {
        Self {
            header: header.to_string(),
            align: Align::Left,
        }
    }

    pub fn right(header: &str) -> Self {
        Self {
            header: header.to_string(),
            align: Align::Right,
        }
    }
}

/// Column widths are computed from content at render time, so cells may
/// carry ANSI colours and wide characters.
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|cell| display_width(cell))
                    .chain(std::iter::once(display_width(&c.header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        let fmt_line = |cells: Vec<String>| -> String {
            cells
                .iter()
                .zip(self.columns.iter().zip(widths.iter()))
                .map(|(cell, (col, &w))| match col.align {
                    Align::Left => pad_right(cell, w),
                    Align::Right => pad_left(cell, w),
                })
                .collect::<Vec<_>>()
                .join(" │ ")
        };

        let header = fmt_line(self.columns.iter().map(|c| c.header.clone()).collect());
        out.push_str(header.trim_end());
        out.push('\n');

        let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
        out.push_str(&rule.join("─┼─"));
        out.push('\n');

        for row in &self.rows {
            let mut cells = row.clone();
            cells.resize(self.columns.len(), String::new());
            out.push_str(fmt_line(cells).trim_end());
            out.push('\n');
        }

        out
    }
}
