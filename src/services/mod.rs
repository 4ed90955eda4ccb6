//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, duplicate detection, auditing and reports.

pub mod duplicate;
pub mod expense;

pub use duplicate::is_duplicate;
pub use expense::{
    CreateExpenseInput, ExpenseFilter, ExpenseGroup, ExpenseService, Grouping, UpdateExpenseInput,
};
