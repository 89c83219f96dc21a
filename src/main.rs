use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use spendlens::audit::AuditLogger;
use spendlens::cli::{
    handle_files_command, handle_history_command, handle_import_command, handle_report_command,
    ReportCommands,
};
use spendlens::config::{paths::SpendPaths, settings::Settings};
use spendlens::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "spendlens",
    version,
    about = "Summarize expenses from uploaded CSV files",
    long_about = "SpendLens ingests CSV batches of expenses (date, amount, category) \
                  and reports spending per category, per month, and for a single \
                  month of your choosing."
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and an empty expense store
    Init,

    /// Upload a CSV batch and append its rows to the store
    #[command(alias = "upload")]
    Import {
        /// Path to a .csv file with date, amount and category columns
        file: PathBuf,
    },

    /// List uploaded files
    Files,

    /// Spending reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show the most recent expenses
    History {
        /// Number of rows to show (defaults to the configured history limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show current configuration and paths
    Config,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "spendlens=debug" } else { "spendlens=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = SpendPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing SpendLens at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'spendlens import <file.csv>' to upload your first batch.");
        }
        Some(Commands::Import { file }) => {
            handle_import_command(&storage, &file)?;
        }
        Some(Commands::Files) => {
            handle_files_command(&storage)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::History { limit }) => {
            handle_history_command(&storage, &settings, limit)?;
        }
        Some(Commands::Config) => {
            println!("SpendLens Configuration");
            println!("=======================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Expense store:     {}", paths.expenses_file().display());
            println!("Uploads directory: {}", paths.uploads_dir().display());
            println!("Audit log:         {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  History limit:    {}", settings.history_limit);
            println!("  Bar width:        {}", settings.bar_width);
            if !settings.extra_date_formats.is_empty() {
                println!("  Date formats:     {}", settings.extra_date_formats.join(", "));
            }

            let recent = AuditLogger::new(paths.audit_log()).read_recent(5)?;
            if !recent.is_empty() {
                println!();
                println!("Recent imports:");
                for entry in recent.iter().rev() {
                    println!("  {}", entry.format_human_readable());
                }
            }
        }
        None => {
            println!("SpendLens - expense breakdowns from CSV uploads");
            println!();
            println!("Run 'spendlens --help' for usage information.");
        }
    }

    Ok(())
}
