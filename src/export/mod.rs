//! Export module for SpendLens
//!
//! Writes any report in one of several formats:
//! - Terminal: the human-readable rendering
//! - CSV: spreadsheet-compatible rows
//! - JSON / YAML: the full report structure, including the empty signal

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::display::DisplayOptions;
use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::Report;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Terminal,
    Csv,
    Json,
    Yaml,
}

/// Write a report to any writer
pub fn write_report<R, W>(
    report: &R,
    format: ExportFormat,
    options: &DisplayOptions,
    mut writer: W,
) -> ExpenseResult<()>
where
    R: Report,
    W: Write,
{
    match format {
        ExportFormat::Terminal => {
            write!(writer, "{}", report.format_terminal(options))
                .map_err(|e| ExpenseError::Export(e.to_string()))?;
        }
        ExportFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(&mut writer);
            report.write_csv(&mut csv_writer)?;
            csv_writer
                .flush()
                .map_err(|e| ExpenseError::Export(e.to_string()))?;
        }
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, report)?;
            writeln!(writer).map_err(|e| ExpenseError::Export(e.to_string()))?;
        }
        ExportFormat::Yaml => {
            serde_yaml::to_writer(&mut writer, report)?;
        }
    }

    writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))
}

/// Write a report to a file, replacing it if it exists
pub fn write_report_to_path<R: Report>(
    report: &R,
    format: ExportFormat,
    options: &DisplayOptions,
    path: &Path,
) -> ExpenseResult<()> {
    let file = File::create(path).map_err(|e| {
        ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    write_report(report, format, options, BufWriter::new(file))
}
