//! CLI commands for reports
//!
//! Each report prints to the terminal by default and can be exported with
//! `--format` and `--output`.

use std::io;
use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::config::settings::Settings;
use crate::display::DisplayOptions;
use crate::error::ExpenseResult;
use crate::export::{write_report, write_report_to_path, ExportFormat};
use crate::reports::Report;
use crate::services::ReportService;
use crate::storage::Storage;

/// Output options shared by all reports
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Terminal)]
    pub format: ExportFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spending by category for one uploaded file
    File {
        /// Name of the uploaded file (see `spendlens files`)
        name: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Monthly spending per category across all expenses
    #[command(alias = "trend")]
    Monthly {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Spending by category for a single month
    Month {
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<String>,

        /// Month number 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> ExpenseResult<()> {
    let service = ReportService::new(storage, settings.date_parser());
    let options = DisplayOptions::from(settings);

    match cmd {
        ReportCommands::File { name, output } => {
            let report = service.file_report(&name)?;
            emit(&report, &output, &options)
        }
        ReportCommands::Monthly { output } => {
            let report = service.trend_report()?;
            emit(&report, &output, &options)
        }
        ReportCommands::Month {
            year,
            month,
            output,
        } => {
            let report = service.month_report(year.as_deref(), month.as_deref())?;
            emit(&report, &output, &options)
        }
    }
}

fn emit<R: Report>(report: &R, args: &OutputArgs, options: &DisplayOptions) -> ExpenseResult<()> {
    match &args.output {
        Some(path) => {
            write_report_to_path(report, args.format, options, path)?;
            println!("Report exported to: {}", path.display());
        }
        None => write_report(report, args.format, options, io::stdout().lock())?,
    }

    Ok(())
}
