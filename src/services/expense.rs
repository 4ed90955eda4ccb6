//! Expense service
//!
//! Business logic on top of the expense repository: input validation,
//! duplicate refusal, timestamps, persistence, audit logging and the
//! report entry points.

use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::audit::{generate_diff, EntityType};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{
    Expense, ExpenseCategory, ExpenseId, ExpenseSummary, Money, WeeklyReport,
};
use crate::reports::{build_weekly_report, summary_for_date, window_ending};
use crate::storage::Storage;

use super::duplicate::is_duplicate;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Only expenses on this date
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<ExpenseCategory>,
    /// Maximum number of expenses to return
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only expenses recorded today (local clock)
    pub fn today(self) -> Self {
        self.date(Local::now().date_naive())
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for creating a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub title: String,
    pub amount: Money,
    pub category: ExpenseCategory,
    pub notes: Option<String>,
    pub receipt: Option<String>,
}

impl CreateExpenseInput {
    pub fn new(title: impl Into<String>, amount: Money, category: ExpenseCategory) -> Self {
        Self {
            title: title.into(),
            amount,
            category,
            notes: None,
            receipt: None,
        }
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Changes to apply to an existing expense; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    pub title: Option<String>,
    pub amount: Option<Money>,
    pub category: Option<ExpenseCategory>,
    pub notes: Option<String>,
    /// `Some(None)` clears the receipt
    pub receipt: Option<Option<String>>,
}

impl UpdateExpenseInput {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.notes.is_none()
            && self.receipt.is_none()
    }
}

/// How to group a list of expenses for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grouping {
    #[default]
    None,
    Category,
    Day,
}

/// A labelled run of expenses
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseGroup {
    pub label: String,
    pub expenses: Vec<Expense>,
    pub total: Money,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create an expense stamped with the current local time
    ///
    /// Refuses with [`ExpenseError::Duplicate`] when an identical expense
    /// already exists today.
    pub fn create(&self, input: CreateExpenseInput) -> ExpenseResult<Expense> {
        self.create_at(input, Local::now().naive_local(), true)
    }

    /// Create an expense even if it looks like a duplicate
    pub fn create_ignoring_duplicate(&self, input: CreateExpenseInput) -> ExpenseResult<Expense> {
        self.create_at(input, Local::now().naive_local(), false)
    }

    /// Create an expense with an explicit timestamp
    pub fn create_at(
        &self,
        input: CreateExpenseInput,
        created_at: NaiveDateTime,
        check_duplicates: bool,
    ) -> ExpenseResult<Expense> {
        let mut expense = Expense::new(
            input.title.trim(),
            input.amount,
            input.category,
            created_at,
        );
        if let Some(notes) = input.notes {
            expense.notes = notes.trim().to_string();
        }
        expense.receipt = input
            .receipt
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        if check_duplicates && self.is_duplicate_of_existing(&expense)? {
            warn!(title = %expense.title, amount = %expense.amount, "refusing likely duplicate");
            return Err(ExpenseError::duplicate_expense(format!(
                "{} {} on {}",
                expense.title,
                expense.amount,
                expense.date()
            )));
        }

        let id = self.storage.expenses.insert(expense)?;
        self.storage.expenses.save()?;

        let stored = self.get_required(id)?;
        self.storage.log_create(&stored)?;

        Ok(stored)
    }

    /// Whether the store already holds an expense with this title, amount
    /// and category on `date`
    pub fn is_duplicate(
        &self,
        title: &str,
        amount: Money,
        category: ExpenseCategory,
        date: NaiveDate,
    ) -> ExpenseResult<bool> {
        let same_day = self.storage.expenses.query_by_date(date)?;
        Ok(is_duplicate(&same_day, title, amount, category, date))
    }

    /// Whether an identical expense exists on the candidate's date
    pub fn is_duplicate_of_existing(&self, candidate: &Expense) -> ExpenseResult<bool> {
        self.is_duplicate(
            &candidate.title,
            candidate.amount,
            candidate.category,
            candidate.date(),
        )
    }

    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    fn get_required(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        self.get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))
    }

    /// Find an expense by an identifier such as `exp-3` or `3`
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Expense>> {
        match identifier.trim().parse::<ExpenseId>() {
            Ok(id) => self.get(id),
            Err(_) => Ok(None),
        }
    }

    /// Update an existing expense, keeping its ID and creation time
    pub fn update(&self, id: ExpenseId, input: UpdateExpenseInput) -> ExpenseResult<Expense> {
        let mut expense = self.get_required(id)?;
        let before = expense.clone();

        if let Some(title) = input.title {
            expense.title = title.trim().to_string();
        }
        if let Some(amount) = input.amount {
            expense.amount = amount;
        }
        if let Some(category) = input.category {
            expense.category = category;
        }
        if let Some(notes) = input.notes {
            expense.notes = notes.trim().to_string();
        }
        if let Some(receipt) = input.receipt {
            expense.receipt = receipt
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty());
        }

        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        // Never move backwards, even if the clock does
        expense.updated_at = Local::now().naive_local().max(before.updated_at);

        if !self.storage.expenses.update(expense.clone())? {
            return Err(ExpenseError::expense_not_found(id.to_string()));
        }
        self.storage.expenses.save()?;

        let diff = match (serde_json::to_value(&before), serde_json::to_value(&expense)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };

        self.storage.log_update(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.title.clone()),
            &before,
            &expense,
            diff,
        )?;

        Ok(expense)
    }

    /// Delete an expense; returns the removed record, or `None` if absent
    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        let Some(expense) = self.get(id)? else {
            debug!(%id, "nothing to delete");
            return Ok(None);
        };

        if !self.storage.expenses.delete(&expense)? {
            return Ok(None);
        }
        self.storage.expenses.save()?;
        self.storage.log_delete(&expense)?;

        Ok(Some(expense))
    }

    /// List expenses, most recent first
    pub fn list(&self, filter: ExpenseFilter) -> ExpenseResult<Vec<Expense>> {
        let mut expenses = if let Some(date) = filter.date {
            self.storage.expenses.query_by_date(date)?
        } else if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
            self.storage.expenses.query_by_date_range(start, end)?
        } else if let Some(category) = filter.category {
            self.storage.expenses.query_by_category(category)?
        } else {
            self.storage.expenses.query_all()?
        };

        if let Some(start) = filter.start_date {
            expenses.retain(|e| e.date() >= start);
        }
        if let Some(end) = filter.end_date {
            expenses.retain(|e| e.date() <= end);
        }
        if let Some(category) = filter.category {
            expenses.retain(|e| e.category == category);
        }

        if let Some(limit) = filter.limit {
            expenses.truncate(limit);
        }

        Ok(expenses)
    }

    /// Group expenses for display, keeping first-seen order of groups
    pub fn group(expenses: &[Expense], grouping: Grouping) -> Vec<ExpenseGroup> {
        let label_for = |expense: &Expense| match grouping {
            Grouping::None => None,
            Grouping::Category => Some(expense.category.labeled()),
            Grouping::Day => Some(expense.date().format("%A, %B %-d").to_string()),
        };

        let mut groups: Vec<ExpenseGroup> = Vec::new();
        for expense in expenses {
            let Some(label) = label_for(expense) else {
                continue;
            };
            match groups.iter_mut().find(|g| g.label == label) {
                Some(group) => {
                    group.total += expense.amount;
                    group.expenses.push(expense.clone());
                }
                None => groups.push(ExpenseGroup {
                    label,
                    total: expense.amount,
                    expenses: vec![expense.clone()],
                }),
            }
        }
        groups
    }

    pub fn today_total(&self) -> ExpenseResult<Money> {
        self.storage.expenses.total_amount_for_today()
    }

    pub fn today_count(&self) -> ExpenseResult<usize> {
        self.storage.expenses.count_for_today()
    }

    /// Report over `[start, end]` from the current store contents
    pub fn weekly_report(&self, start: NaiveDate, end: NaiveDate) -> ExpenseResult<WeeklyReport> {
        if start > end {
            return build_weekly_report(&[], start, end);
        }
        let expenses = self.storage.expenses.query_by_date_range(start, end)?;
        build_weekly_report(&expenses, start, end)
    }

    /// Report for the seven days ending on `today`
    pub fn last_seven_days_report(&self, today: NaiveDate) -> ExpenseResult<WeeklyReport> {
        self.last_days_report(today, 7)
    }

    /// Report for the `days` days ending on `end`
    pub fn last_days_report(&self, end: NaiveDate, days: u32) -> ExpenseResult<WeeklyReport> {
        let (start, end) = window_ending(end, days);
        self.weekly_report(start, end)
    }

    pub fn summary_for_date(&self, date: NaiveDate) -> ExpenseResult<ExpenseSummary> {
        let expenses = self.storage.expenses.query_by_date(date)?;
        Ok(summary_for_date(&expenses, date))
    }
}
