//! Single-day summary

use chrono::NaiveDate;

use crate::models::{Expense, ExpenseSummary};

/// Totals for `date`, ignoring expenses on any other day
pub fn summary_for_date(expenses: &[Expense], date: NaiveDate) -> ExpenseSummary {
    summarize_day(date, expenses.iter().filter(|e| e.is_on(date)))
}

/// Fold expenses already known to fall on `date` into a summary
pub(crate) fn summarize_day<'a>(
    date: NaiveDate,
    expenses: impl IntoIterator<Item = &'a Expense>,
) -> ExpenseSummary {
    expenses
        .into_iter()
        .fold(ExpenseSummary::empty(date), |mut summary, expense| {
            summary.total_amount += expense.amount;
            summary.expense_count += 1;
            *summary
                .category_breakdown
                .entry(expense.category)
                .or_default() += expense.amount;
            summary
        })
}
