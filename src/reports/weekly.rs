//! Weekly report
//!
//! Aggregates a flat expense list over a closed date interval into one
//! summary per calendar day plus a per-category breakdown of the whole
//! interval.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{CategorySummary, Expense, Money, WeeklyReport};

use super::daily::summarize_day;

/// Build the report for `[start, end]`
///
/// Every day in the interval gets a summary, empty days included. Category
/// summaries appear in the order their category is first met in `expenses`.
/// Fails with [`ExpenseError::InvalidArgument`] when `start` is after `end`.
pub fn build_weekly_report(
    expenses: &[Expense],
    start: NaiveDate,
    end: NaiveDate,
) -> ExpenseResult<WeeklyReport> {
    if start > end {
        return Err(ExpenseError::InvalidArgument(format!(
            "Report start {} is after end {}",
            start, end
        )));
    }

    let in_window: Vec<&Expense> = expenses
        .iter()
        .filter(|e| e.is_between(start, end))
        .collect();

    let mut by_date: BTreeMap<NaiveDate, Vec<&Expense>> = BTreeMap::new();
    for &expense in &in_window {
        by_date.entry(expense.date()).or_default().push(expense);
    }

    let daily_summaries: Vec<_> = start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| {
            let day = by_date.remove(&date).unwrap_or_default();
            summarize_day(date, day)
        })
        .collect();

    let total_amount: Money = in_window.iter().map(|e| e.amount).sum();

    let mut category_summaries: Vec<CategorySummary> = Vec::new();
    for expense in &in_window {
        match category_summaries
            .iter_mut()
            .find(|s| s.category == expense.category)
        {
            Some(summary) => {
                summary.total_amount += expense.amount;
                summary.expense_count += 1;
            }
            None => category_summaries.push(CategorySummary {
                category: expense.category,
                total_amount: expense.amount,
                expense_count: 1,
                percentage: 0.0,
            }),
        }
    }
    for summary in &mut category_summaries {
        summary.percentage = summary.total_amount.percent_of(total_amount);
    }

    debug!(
        %start,
        %end,
        expenses = in_window.len(),
        categories = category_summaries.len(),
        "built weekly report"
    );

    Ok(WeeklyReport {
        start_date: start,
        end_date: end,
        daily_summaries,
        category_summaries,
        total_amount,
        total_expenses: in_window.len(),
    })
}

/// The `days`-long window ending on (and including) `end`
///
/// A window of zero days is treated as one.
pub fn window_ending(end: NaiveDate, days: u32) -> (NaiveDate, NaiveDate) {
    let span = i64::from(days.max(1)) - 1;
    (end - Duration::days(span), end)
}
