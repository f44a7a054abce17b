//! Text rendering of [`Table`]s for terminals and Markdown cells.

use crate::core::models::table::{Table, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("CSV writer error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV output could not be finalized: {0}")]
    Flush(String),
    #[error("Expected {expected} header(s) for the table columns, got {found}")]
    HeaderMismatch { expected: usize, found: usize },
}

/// Output layout for a formatted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableStyle {
    /// Space-aligned columns under a dashed rule.
    #[default]
    Simple,
    /// Markdown pipe table with alignment markers.
    Pipe,
    /// RFC 4180 comma-separated values.
    Csv,
}

impl FromStr for TableStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(TableStyle::Simple),
            "pipe" | "markdown" | "md" => Ok(TableStyle::Pipe),
            "csv" => Ok(TableStyle::Csv),
            other => Err(format!(
                "unknown table style '{}' (expected simple, pipe or csv)",
                other
            )),
        }
    }
}

impl fmt::Display for TableStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TableStyle::Simple => "simple",
            TableStyle::Pipe => "pipe",
            TableStyle::Csv => "csv",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

const MIN_PADDING: usize = 2;

fn column_alignments(table: &Table) -> Vec<Align> {
    (0..table.columns().len())
        .map(|i| {
            let mut seen_number = false;
            for row in table.rows() {
                match &row.values()[i] {
                    Value::Null => {}
                    Value::Integer(_) | Value::Real(_) => seen_number = true,
                    _ => return Align::Left,
                }
            }
            if seen_number { Align::Right } else { Align::Left }
        })
        .collect()
}

fn pad(text: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{:<width$}", text, width = width),
        Align::Right => format!("{:>width$}", text, width = width),
    }
}

/// Formats `table` using `headers` as the header row.
///
/// `headers` must have one entry per column.
pub fn format_table(table: &Table, headers: &[String], style: TableStyle) -> Result<String, FormatError> {
    if headers.len() != table.columns().len() {
        return Err(FormatError::HeaderMismatch {
            expected: table.columns().len(),
            found: headers.len(),
        });
    }
    let cells: Vec<Vec<String>> = table
        .rows()
        .map(|row| row.values().iter().map(Value::to_text).collect())
        .collect();
    let aligns = column_alignments(table);
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(h.chars().count() + MIN_PADDING))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(cells.len() + 2);
    match style {
        TableStyle::Simple => {
            let render_row = |row: &[String]| {
                row.iter()
                    .enumerate()
                    .map(|(i, c)| pad(c, widths[i], aligns[i]))
                    .collect::<Vec<_>>()
                    .join("  ")
                    .trim_end()
                    .to_string()
            };
            lines.push(render_row(headers));
            lines.push(
                widths
                    .iter()
                    .map(|w| "-".repeat(*w))
                    .collect::<Vec<_>>()
                    .join("  "),
            );
            lines.extend(cells.iter().map(|row| render_row(row)));
        }
        TableStyle::Pipe => {
            let render_row = |row: &[String]| {
                let inner = row
                    .iter()
                    .enumerate()
                    .map(|(i, c)| pad(c, widths[i], aligns[i]))
                    .collect::<Vec<_>>()
                    .join(" | ");
                format!("| {} |", inner)
            };
            lines.push(render_row(headers));
            let rule = widths
                .iter()
                .zip(&aligns)
                .map(|(w, a)| match a {
                    Align::Left => format!(":{}", "-".repeat(w + 1)),
                    Align::Right => format!("{}:", "-".repeat(w + 1)),
                })
                .collect::<Vec<_>>()
                .join("|");
            lines.push(format!("|{}|", rule));
            lines.extend(cells.iter().map(|row| render_row(row)));
        }
        TableStyle::Csv => return format_csv(table, headers),
    }
    Ok(lines.join("\n"))
}

fn format_csv(table: &Table, headers: &[String]) -> Result<String, FormatError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in table.rows() {
        writer.write_record(row.values().iter().map(Value::to_text))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| FormatError::Flush(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| FormatError::Flush(e.to_string()))
}
