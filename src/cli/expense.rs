//! Expense CLI commands
//!
//! Implements CLI commands for recording, listing, editing and deleting
//! expenses.

use clap::{Subcommand, ValueEnum};

use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_list, format_grouped_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::services::{
    CreateExpenseInput, ExpenseFilter, ExpenseService, Grouping, UpdateExpenseInput,
};
use crate::storage::Storage;

use super::{parse_amount, parse_category, parse_date, parse_id};

/// How `list` groups its output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GroupBy {
    #[default]
    None,
    Category,
    Day,
}

impl From<GroupBy> for Grouping {
    fn from(value: GroupBy) -> Self {
        match value {
            GroupBy::None => Grouping::None,
            GroupBy::Category => Grouping::Category,
            GroupBy::Day => Grouping::Day,
        }
    }
}

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        title: String,
        /// Amount (e.g., "250" or "12.50")
        amount: String,
        /// Category: staff, travel, food or utility
        #[arg(short, long, default_value = "food")]
        category: String,
        /// Notes (up to 100 characters)
        #[arg(short, long)]
        notes: Option<String>,
        /// Receipt reference
        #[arg(short, long)]
        receipt: Option<String>,
        /// Record even if an identical expense exists today
        #[arg(short, long)]
        force: bool,
    },
    /// List expenses, most recent first
    #[command(alias = "ls")]
    List {
        /// Only today's expenses
        #[arg(long, conflicts_with_all = ["date", "from", "to"])]
        today: bool,
        /// Only expenses on this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Group the output
        #[arg(short, long, value_enum, default_value_t = GroupBy::None)]
        group: GroupBy,
    },
    /// Show expense details
    Show {
        /// Expense ID (e.g. exp-3)
        id: String,
    },
    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
        /// New receipt reference ("none" clears it)
        #[arg(short, long)]
        receipt: Option<String>,
    },
    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            title,
            amount,
            category,
            notes,
            receipt,
            force,
        } => {
            let input = CreateExpenseInput {
                title,
                amount: parse_amount(&amount)?,
                category: parse_category(&category)?,
                notes,
                receipt,
            };

            let result = if force || !settings.duplicate_check {
                service.create_ignoring_duplicate(input)
            } else {
                service.create(input)
            };

            let expense = match result {
                Err(e) if e.is_duplicate() => {
                    eprintln!("A matching expense was already recorded today.");
                    eprintln!("Use --force to record it anyway.");
                    return Err(e);
                }
                other => other?,
            };

            println!("Recorded expense:");
            print!("{}", format_expense_details(&expense, settings));
            println!(
                "Today: {} across {} expense(s)",
                settings.format_money(service.today_total()?),
                service.today_count()?
            );
        }

        ExpenseCommands::List {
            today,
            date,
            from,
            to,
            category,
            limit,
            group,
        } => {
            let mut filter = ExpenseFilter::new().limit(limit);

            if today {
                filter = filter.today();
            }
            if let Some(date) = date {
                filter = filter.date(parse_date(&date)?);
            }
            if let (Some(from), Some(to)) = (from, to) {
                let (start, end) = (parse_date(&from)?, parse_date(&to)?);
                if start > end {
                    return Err(ExpenseError::InvalidArgument(format!(
                        "--from {} is after --to {}",
                        start, end
                    )));
                }
                filter = filter.date_range(start, end);
            }
            if let Some(category) = category {
                filter = filter.category(parse_category(&category)?);
            }

            let expenses = service.list(filter)?;

            match Grouping::from(group) {
                Grouping::None => println!("{}", format_expense_list(&expenses, settings)),
                grouping => {
                    let groups = ExpenseService::group(&expenses, grouping);
                    println!("{}", format_grouped_list(&groups, settings));
                }
            }
        }

        ExpenseCommands::Show { id } => {
            let expense = service
                .find(&id)?
                .ok_or_else(|| ExpenseError::expense_not_found(&id))?;
            print!("{}", format_expense_details(&expense, settings));
        }

        ExpenseCommands::Edit {
            id,
            title,
            amount,
            category,
            notes,
            receipt,
        } => {
            let input = UpdateExpenseInput {
                title,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                category: category.as_deref().map(parse_category).transpose()?,
                notes,
                receipt: receipt.map(|r| {
                    if r.trim().is_empty() || r.eq_ignore_ascii_case("none") {
                        None
                    } else {
                        Some(r)
                    }
                }),
            };

            if input.is_empty() {
                println!("Nothing to change. Pass --title, --amount, --category, --notes or --receipt.");
                return Ok(());
            }

            let updated = service.update(parse_id(&id)?, input)?;
            println!("Updated expense:");
            print!("{}", format_expense_details(&updated, settings));
        }

        ExpenseCommands::Delete { id, force } => {
            let id = parse_id(&id)?;
            let Some(expense) = service.get(id)? else {
                println!("No expense {} to delete.", id);
                return Ok(());
            };

            if !force {
                println!("About to delete expense:");
                print!("{}", format_expense_details(&expense, settings));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            if let Some(deleted) = service.delete(id)? {
                println!(
                    "Deleted expense: {} ({} {})",
                    deleted.id,
                    deleted.title,
                    settings.format_money(deleted.amount)
                );
            }
        }
    }

    Ok(())
}
