// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Column-aligned table for `ap list`.

use std::io::Write;

use crate::color;

/// How a cell's text is styled after padding.
pub enum CellStyle {
    Plain,
    Muted,
    /// Colored by [`color::apply_status`]
    Status,
}

/// A left-aligned column in a [`Table`].
pub struct Column {
    pub name: &'static str,
    pub style: CellStyle,
    /// Values longer than this keep their tail behind a leading `…`
    pub max_width: Option<usize>,
}

impl Column {
    pub fn left(name: &'static str) -> Self {
        Self {
            name,
            style: CellStyle::Plain,
            max_width: None,
        }
    }

    pub fn muted(name: &'static str) -> Self {
        Self {
            style: CellStyle::Muted,
            ..Self::left(name)
        }
    }

    pub fn status(name: &'static str) -> Self {
        Self {
            style: CellStyle::Status,
            ..Self::left(name)
        }
    }

    pub fn with_max(mut self, max: usize) -> Self {
        self.max_width = Some(max);
        self
    }
}

pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    colorize: bool,
}

const SEP: &str = "  ";

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            colorize: color::should_colorize(),
        }
    }

    #[cfg(test)]
    pub fn plain(columns: Vec<Column>) -> Self {
        Self {
            colorize: false,
            ..Self::new(columns)
        }
    }

    #[cfg(test)]
    pub fn colored(columns: Vec<Column>) -> Self {
        Self {
            colorize: true,
            ..Self::new(columns)
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// Render header and rows. Nothing is written for an empty table.
    ///
    /// Color is applied after padding so escapes never count toward widths;
    /// the last column is not padded.
    pub fn render(&self, out: &mut impl Write) -> std::io::Result<()> {
        if self.rows.is_empty() {
            return Ok(());
        }
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .enumerate()
                    .map(|(i, col)| fit(row.get(i).map_or("", String::as_str), col.max_width))
                    .collect()
            })
            .collect();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .fold(col.name.len(), usize::max)
            })
            .collect();
        let last = self.columns.len().saturating_sub(1);

        let header: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let text = pad(col.name, widths[i], i == last);
                if self.colorize {
                    color::apply_header(&text)
                } else {
                    text
                }
            })
            .collect();
        writeln!(out, "{}", header.join(SEP))?;

        for row in &cells {
            let line: Vec<String> = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, col)| {
                    let text = pad(&row[i], widths[i], i == last);
                    stylize(text, &col.style, self.colorize)
                })
                .collect();
            writeln!(out, "{}", line.join(SEP))?;
        }
        Ok(())
    }
}

fn pad(text: &str, width: usize, last: bool) -> String {
    if last {
        text.to_string()
    } else {
        format!("{:<width$}", text)
    }
}

/// Shorten `text` to `max` characters, keeping the end.
///
/// Paths are the long values here and their tail is the informative part.
fn fit(text: &str, max: Option<usize>) -> String {
    let len = text.chars().count();
    match max {
        Some(m) if m > 0 && len > m => {
            let tail: String = text.chars().skip(len - (m - 1)).collect();
            format!("…{}", tail)
        }
        _ => text.to_string(),
    }
}

fn stylize(text: String, style: &CellStyle, colorize: bool) -> String {
    if !colorize {
        return text;
    }
    match style {
        CellStyle::Plain => text,
        CellStyle::Muted => color::apply_muted(&text),
        CellStyle::Status => color::apply_status(&text),
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
