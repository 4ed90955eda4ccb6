//! Expense categories
//!
//! Categories form a small closed set. Each carries a display label and an
//! emoji used in grouped lists and shared reports.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of an expense
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExpenseCategory {
    /// Salaries, bonuses and other staff costs
    Staff,
    /// Transport and lodging
    Travel,
    /// Meals and refreshments
    #[default]
    Food,
    /// Supplies, bills and other running costs
    Utility,
}

impl ExpenseCategory {
    /// All categories in declaration order
    pub const ALL: [ExpenseCategory; 4] = [
        ExpenseCategory::Staff,
        ExpenseCategory::Travel,
        ExpenseCategory::Food,
        ExpenseCategory::Utility,
    ];

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Staff => "Staff",
            Self::Travel => "Travel",
            Self::Food => "Food",
            Self::Utility => "Utility",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Staff => "👥",
            Self::Travel => "✈️",
            Self::Food => "🍽️",
            Self::Utility => "⚡",
        }
    }

    /// Label with its emoji, e.g. "🍽️ Food"
    pub fn labeled(&self) -> String {
        format!("{} {}", self.emoji(), self.display_name())
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ExpenseCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.display_name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CategoryParseError(needle.to_string()))
    }
}

/// Error returned when a string does not name a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError(pub String);

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown category '{}'. Expected one of: staff, travel, food, utility",
            self.0
        )
    }
}

impl std::error::Error for CategoryParseError {}
