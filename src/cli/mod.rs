//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod report;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use report::{handle_report_command, ReportCommands};

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseCategory, ExpenseId, Money};

pub(crate) fn parse_date(input: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        ExpenseError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", input))
    })
}

pub(crate) fn parse_amount(input: &str) -> ExpenseResult<Money> {
    Money::parse(input).map_err(|e| {
        ExpenseError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '250' or '12.50'. Error: {}",
            input, e
        ))
    })
}

pub(crate) fn parse_category(input: &str) -> ExpenseResult<ExpenseCategory> {
    input.parse().map_err(|_| {
        ExpenseError::Validation(format!(
            "Unknown category: '{}'. Use one of staff, travel, food, utility",
            input
        ))
    })
}

pub(crate) fn parse_id(input: &str) -> ExpenseResult<ExpenseId> {
    input
        .trim()
        .parse()
        .map_err(|_| ExpenseError::expense_not_found(input))
}
