//! Live, filtered views over the expense store
//!
//! The repository publishes its full sorted snapshot on a `watch` channel
//! after every mutation. An [`ExpenseView`] holds one receiver plus a filter:
//! it always yields the newest snapshot, never a backlog.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::watch;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseCategory};

/// Snapshot published by the repository, most recent expense first
pub type Snapshot = Arc<Vec<Expense>>;

/// Which expenses a view or query selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseSelector {
    #[default]
    All,
    /// Expenses created on this calendar date
    Date(NaiveDate),
    Category(ExpenseCategory),
    /// Expenses created within the inclusive date range
    Range(NaiveDate, NaiveDate),
}

impl ExpenseSelector {
    pub fn matches(&self, expense: &Expense) -> bool {
        match *self {
            Self::All => true,
            Self::Date(date) => expense.is_on(date),
            Self::Category(category) => expense.category == category,
            Self::Range(start, end) => expense.is_between(start, end),
        }
    }

    /// Apply the selector to a snapshot, preserving order
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        expenses
            .iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect()
    }
}

/// A subscription to the store that yields filtered snapshots
#[derive(Debug, Clone)]
pub struct ExpenseView {
    receiver: watch::Receiver<Snapshot>,
    selector: ExpenseSelector,
}

impl ExpenseView {
    pub(crate) fn new(receiver: watch::Receiver<Snapshot>, selector: ExpenseSelector) -> Self {
        Self { receiver, selector }
    }

    pub fn selector(&self) -> ExpenseSelector {
        self.selector
    }

    /// The current filtered list, without marking it as seen
    pub fn latest(&self) -> Vec<Expense> {
        self.selector.apply(&self.receiver.borrow())
    }

    /// Whether the store published a snapshot this view has not consumed
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Take the newest snapshot if one arrived since the last call
    pub fn poll(&mut self) -> Option<Vec<Expense>> {
        if !self.has_changed() {
            return None;
        }
        Some(self.selector.apply(&self.receiver.borrow_and_update()))
    }

    /// Wait for the next mutation and return the resulting filtered list
    ///
    /// Fails once the store has been dropped.
    pub async fn changed(&mut self) -> ExpenseResult<Vec<Expense>> {
        self.receiver
            .changed()
            .await
            .map_err(|_| ExpenseError::Storage("Expense store was closed".into()))?;
        Ok(self.selector.apply(&self.receiver.borrow_and_update()))
    }
}
