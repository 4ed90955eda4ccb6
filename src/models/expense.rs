//! Expense model
//!
//! A single recorded spending event: what it was for, how much, which
//! category, and when it was entered.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ExpenseCategory;
use super::ids::ExpenseId;
use super::money::Money;

/// Maximum number of characters allowed in an expense's notes
pub const MAX_NOTES_LEN: usize = 100;

/// Largest amount a single expense may carry (one billion units)
pub const MAX_AMOUNT: Money = Money::from_units(1_000_000_000);

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Store-assigned identifier (unassigned until inserted)
    #[serde(default)]
    pub id: ExpenseId,

    /// Short description, e.g. "Team lunch"
    pub title: String,

    /// Amount spent (always positive for a valid expense)
    pub amount: Money,

    pub category: ExpenseCategory,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// Opaque reference to a receipt kept elsewhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,

    /// Local date-time the expense was entered
    pub created_at: NaiveDateTime,

    /// Local date-time of the last edit
    pub updated_at: NaiveDateTime,
}

impl Expense {
    /// Create a new, not yet stored expense
    pub fn new(
        title: impl Into<String>,
        amount: Money,
        category: ExpenseCategory,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: ExpenseId::UNASSIGNED,
            title: title.into(),
            amount,
            category,
            notes: String::new(),
            receipt: None,
            created_at,
            updated_at: created_at,
        }
    }

    /// Set the notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Attach a receipt reference
    pub fn with_receipt(mut self, receipt: impl Into<String>) -> Self {
        self.receipt = Some(receipt.into());
        self
    }

    /// Calendar date the expense belongs to
    pub fn date(&self) -> NaiveDate {
        self.created_at.date()
    }

    /// Whether the expense falls on `date`
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date() == date
    }

    /// Whether the expense falls within `[start, end]`
    pub fn is_between(&self, start: NaiveDate, end: NaiveDate) -> bool {
        let date = self.date();
        date >= start && date <= end
    }

    /// Validate the expense fields
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.title.trim().is_empty() {
            return Err(ExpenseValidationError::BlankTitle);
        }

        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        if self.amount > MAX_AMOUNT {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }

        let notes_len = self.notes.chars().count();
        if notes_len > MAX_NOTES_LEN {
            return Err(ExpenseValidationError::NotesTooLong(notes_len));
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.created_at.format("%Y-%m-%d"),
            self.title,
            self.category,
            self.amount
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    BlankTitle,
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    NotesTooLong(usize),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "Expense title cannot be blank"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Expense amount cannot exceed {} (got {})",
                MAX_AMOUNT, amount
            ),
            Self::NotesTooLong(len) => write!(
                f,
                "Notes are limited to {} characters (got {})",
                MAX_NOTES_LEN, len
            ),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
