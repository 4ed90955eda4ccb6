//! Derived report records
//!
//! These are views computed from expenses on demand; none of them is stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::category::ExpenseCategory;
use super::money::Money;

/// Totals for a single calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub date: NaiveDate,
    pub total_amount: Money,
    pub expense_count: usize,
    /// Summed amount per category; only categories seen that day appear
    pub category_breakdown: BTreeMap<ExpenseCategory, Money>,
}

impl ExpenseSummary {
    /// A summary for a day with no expenses
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_amount: Money::zero(),
            expense_count: 0,
            category_breakdown: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expense_count == 0
    }

    /// Amount spent in `category` that day (zero if none)
    pub fn amount_for(&self, category: ExpenseCategory) -> Money {
        self.category_breakdown
            .get(&category)
            .copied()
            .unwrap_or_default()
    }
}

/// Totals for one category across a report window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: ExpenseCategory,
    pub total_amount: Money,
    pub expense_count: usize,
    /// Share of the window total, 0-100
    pub percentage: f64,
}

/// Aggregated view of a closed date interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// One entry per calendar day, oldest first
    pub daily_summaries: Vec<ExpenseSummary>,
    /// One entry per category present, in first-encountered order
    pub category_summaries: Vec<CategorySummary>,
    pub total_amount: Money,
    pub total_expenses: usize,
}

impl WeeklyReport {
    /// Number of days covered by the report
    pub fn day_count(&self) -> usize {
        self.daily_summaries.len()
    }

    /// Summary for a specific day inside the window
    pub fn day(&self, date: NaiveDate) -> Option<&ExpenseSummary> {
        self.daily_summaries.iter().find(|s| s.date == date)
    }

    /// Summary for a category, if it had any expenses
    pub fn category(&self, category: ExpenseCategory) -> Option<&CategorySummary> {
        self.category_summaries
            .iter()
            .find(|s| s.category == category)
    }

    /// Day with the highest spending, ignoring empty days
    pub fn busiest_day(&self) -> Option<&ExpenseSummary> {
        self.daily_summaries
            .iter()
            .filter(|s| !s.is_empty())
            .max_by_key(|s| s.total_amount)
    }

    /// Average spend per calendar day in the window
    pub fn daily_average(&self) -> Money {
        if self.daily_summaries.is_empty() {
            return Money::zero();
        }
        Money::from_cents(self.total_amount.cents() / self.daily_summaries.len() as i64)
    }
}
