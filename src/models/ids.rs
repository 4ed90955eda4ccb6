//! Strongly-typed ID wrapper for expenses
//!
//! Expense IDs are sequential integers assigned by the store. Wrapping them
//! keeps raw counts and row indexes from being passed where an ID is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

const DISPLAY_PREFIX: &str = "exp-";

/// Identifier of a stored expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(i64);

impl ExpenseId {
    /// Placeholder ID for records that have not been inserted yet
    pub const UNASSIGNED: ExpenseId = ExpenseId(0);

    /// Wrap a raw ID value
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the underlying integer
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// The ID that follows this one
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Whether the store has assigned this ID
    pub const fn is_assigned(&self) -> bool {
        self.0 > 0
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::UNASSIGNED
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DISPLAY_PREFIX, self.0)
    }
}

impl From<i64> for ExpenseId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for ExpenseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix(DISPLAY_PREFIX).unwrap_or(s);
        Ok(Self(s.parse()?))
    }
}
