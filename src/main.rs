use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_tracker::cli::{
    handle_expense_command, handle_report_command, ExpenseCommands, ReportCommands,
};
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::logging;
use expense_tracker::storage::{initialize_storage, seed_sample_data, Storage};

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Record expenses and review daily and weekly spending",
    long_about = "Record expenses by category, catch accidental duplicates, and \
                  review daily summaries and weekly reports with per-category \
                  percentages."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    #[command(flatten)]
    Report(ReportCommands),

    /// Create the data directory and default settings
    Init {
        /// Also add a handful of example expenses
        #[arg(long)]
        sample: bool,
    },

    /// Show current configuration and paths
    Config,

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    logging::init(Some(&settings.log_level));

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Init { sample }) => {
            println!("Initializing expense tracker at: {}", paths.base_dir().display());
            if initialize_storage(&paths)? {
                storage.log_settings_created(&settings)?;
                println!("Created default settings.");
            } else {
                println!("Already initialized; settings left unchanged.");
            }

            if sample {
                let added = seed_sample_data(&storage)?;
                if added > 0 {
                    println!("Added {} sample expenses.", added);
                } else {
                    println!("Expenses already exist; no samples added.");
                }
            }

            println!();
            println!("Run 'expense add \"Team lunch\" 250 --category food' to record an expense.");
        }
        Some(Commands::Config) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Expenses file:  {}", paths.expenses_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!("Initialized:    {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Report window:      {} days", settings.report_window_days);
            println!("  Duplicate check:    {}", settings.duplicate_check);
            println!("  Date format:        {}", settings.date_format);
            println!("  Log level:          {}", settings.log_level);
        }
        Some(Commands::Audit { limit }) => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No audit entries yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        None => {
            println!("Expense Tracker - record expenses and review weekly reports");
            println!();
            println!("Run 'expense --help' for usage information.");
            println!("Run 'expense init --sample' to get started with example data.");
        }
    }

    Ok(())
}
