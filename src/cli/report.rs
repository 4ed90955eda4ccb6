//! CLI commands for reports

use chrono::Local;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_daily_summary, format_expense_list, format_weekly_report, share_text};
use crate::error::{ExpenseError, ExpenseResult};
use crate::services::{ExpenseFilter, ExpenseService};
use crate::storage::Storage;

use super::parse_date;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Daily totals and category breakdown over a date range
    #[command(alias = "weekly")]
    Report {
        /// Start date (YYYY-MM-DD); requires --to
        #[arg(short, long, requires = "to")]
        from: Option<String>,
        /// End date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        to: Option<String>,
        /// Window length in days when --from is not given
        #[arg(short, long)]
        days: Option<u32>,
        /// Print the plain-text share message instead of the full report
        #[arg(short, long)]
        share: bool,
    },
    /// Totals for a single day
    Summary {
        /// Date (YYYY-MM-DD), defaults to today
        date: Option<String>,
    },
    /// Today's total, count and expenses
    Today,
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage);
    let today = Local::now().date_naive();

    match cmd {
        ReportCommands::Report {
            from,
            to,
            days,
            share,
        } => {
            let end = to.as_deref().map(parse_date).transpose()?.unwrap_or(today);

            let report = match from {
                Some(from) => service.weekly_report(parse_date(&from)?, end)?,
                None => {
                    let days = days.unwrap_or(settings.report_window_days);
                    if days == 0 {
                        return Err(ExpenseError::InvalidArgument(
                            "--days must be at least 1".into(),
                        ));
                    }
                    service.last_days_report(end, days)?
                }
            };

            if share {
                print!("{}", share_text(&report, settings));
            } else {
                print!("{}", format_weekly_report(&report, settings));
            }
        }

        ReportCommands::Summary { date } => {
            let date = date.as_deref().map(parse_date).transpose()?.unwrap_or(today);
            let summary = service.summary_for_date(date)?;
            print!("{}", format_daily_summary(&summary, settings));
        }

        ReportCommands::Today => {
            println!(
                "Today's total: {} ({} expense(s))",
                settings.format_money(service.today_total()?),
                service.today_count()?
            );
            let expenses = service.list(ExpenseFilter::new().today())?;
            if !expenses.is_empty() {
                println!("{}", format_expense_list(&expenses, settings));
            }
        }
    }

    Ok(())
}
