//! Expense Tracker - record expenses and review spending by day and category
//!
//! This library provides the core of the `expense` command-line tool:
//! an expense store with live views, a duplicate check applied at entry
//! time, and a report engine that turns the flat list of expenses into
//! daily summaries and per-category percentages.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, categories, money, summaries)
//! - `storage`: JSON file storage and live, filtered views
//! - `audit`: Append-only audit log of every change
//! - `services`: Business logic (validation, duplicate check, reports)
//! - `reports`: Daily summaries and multi-day reports
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `expense` binary
//! - `logging`: Diagnostic logging setup
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::ExpensePaths;
//! use expense_tracker::models::{ExpenseCategory, Money};
//! use expense_tracker::services::{CreateExpenseInput, ExpenseService};
//! use expense_tracker::storage::Storage;
//!
//! let mut storage = Storage::new(ExpensePaths::new()?)?;
//! storage.load_all()?;
//!
//! let service = ExpenseService::new(&storage);
//! service.create(CreateExpenseInput::new("Lunch", Money::from_units(250), ExpenseCategory::Food))?;
//! let report = service.last_seven_days_report(chrono::Local::now().date_naive())?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
