//! Duplicate detection at entry time
//!
//! A new expense looks like a duplicate when an existing one on the same
//! day has exactly the same title, amount and category. The check is
//! advisory: callers decide whether to refuse or proceed.

use chrono::NaiveDate;

use crate::models::{Expense, ExpenseCategory, Money};

/// Whether `expenses` already holds an entry matching the candidate
///
/// Title comparison is exact and case-sensitive. Amounts are compared in
/// minor units, so equality is exact.
pub fn is_duplicate(
    expenses: &[Expense],
    title: &str,
    amount: Money,
    category: ExpenseCategory,
    date: NaiveDate,
) -> bool {
    expenses.iter().any(|e| {
        e.is_on(date) && e.title == title && e.amount == amount && e.category == category
    })
}
