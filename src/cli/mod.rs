//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod history;
pub mod import;
pub mod report;

pub use history::handle_history_command;
pub use import::{handle_files_command, handle_import_command};
pub use report::{handle_report_command, OutputArgs, ReportCommands};
