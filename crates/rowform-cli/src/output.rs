//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, CSV, human-readable tables) with
//! support for transformed rows and progress indicators.

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rowform_core::{value_to_text, Row};
use serde::Serialize;
use std::io::{self, Write};
use tracing::trace;

/// Trait for formatting output with specialized support for rows
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format transformed rows under the given column names
    fn format_rows(&self, rows: &[Row], columns: &[String]) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty | OutputFormat::Human => {
                Ok(serde_json::to_string_pretty(value)?)
            }
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Csv => Err(Error::config("CSV output is only available for rows")),
        }
    }

    fn format_rows(&self, rows: &[Row], columns: &[String]) -> Result<String> {
        match self {
            OutputFormat::Csv => format_rows_csv(rows, columns),
            OutputFormat::Human => Ok(format_rows_table(rows, columns)),
            other => other.format(&rows),
        }
    }
}

/// Column names in first-occurrence order with duplicates removed
pub fn unique_columns(names: &[String]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !columns.contains(name) {
            columns.push(name.clone());
        }
    }
    columns
}

/// Render column names as a single CSV record
pub fn format_csv_header(columns: &[String]) -> Result<String> {
    format_rows_csv(&[], columns)
}

/// Render rows as CSV with a header line
fn format_rows_csv(rows: &[Row], columns: &[String]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns)?;

    for row in rows {
        writer.write_record(columns.iter().map(|column| cell_text(row, column)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::other(format!("Failed to finish CSV output: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| Error::other(format!("CSV output is not UTF-8: {}", e)))
}

/// Render rows as an aligned text table
fn format_rows_table(rows: &[Row], columns: &[String]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|column| cell_text(row, column)).collect())
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |values: &[String]| {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| format!("{:width$}", v, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" │ ")
            .trim_end()
            .to_string()
    };

    let mut output = String::new();
    output.push_str(&line(columns));
    output.push('\n');
    output.push_str(
        &widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─"),
    );
    output.push('\n');
    for row in &cells {
        output.push_str(&line(row));
        output.push('\n');
    }
    output
}

fn cell_text(row: &Row, column: &str) -> String {
    row.get(column).map(value_to_text).unwrap_or_default()
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, show_progress: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: show_progress && !quiet,
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(format: OutputFormat, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color: false,
            show_progress: false, // No progress bars with custom writers
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");
        self.writeln(formatted.trim_end())
    }

    /// Write transformed rows in the configured format
    pub fn rows(&mut self, rows: &[Row], columns: &[String]) -> Result<()> {
        let formatted = self.format.format_rows(rows, columns)?;
        trace!(rows = rows.len(), bytes = formatted.len(), "Outputting rows");
        self.writeln(formatted.trim_end())
    }

    /// Create a progress bar for long operations
    pub fn progress_bar(&self, length: u64, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(length);
        pb.set_style(default_progress_style());
        pb.set_message(message.to_string());
        Some(pb)
    }
}

/// Helper function to create a progress bar style
pub fn default_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}
