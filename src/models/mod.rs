//! Core data models for the expense tracker
//!
//! This module contains the data structures that represent the expense
//! domain: expenses, categories, money amounts and derived report records.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod summary;

pub use category::{CategoryParseError, ExpenseCategory};
pub use expense::{Expense, ExpenseValidationError, MAX_AMOUNT, MAX_NOTES_LEN};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
pub use summary::{CategorySummary, ExpenseSummary, WeeklyReport};
