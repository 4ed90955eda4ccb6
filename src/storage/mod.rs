//! Storage layer for the expense tracker
//!
//! JSON file storage with atomic writes, live views over the expense list,
//! and audit logging of every change.

pub mod expenses;
pub mod file_io;
pub mod init;
pub mod view;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, seed_sample_data};
pub use view::{ExpenseSelector, ExpenseView, Snapshot};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::ExpensePaths;
use crate::error::ExpenseError;
use crate::models::Expense;

/// Main storage coordinator
pub struct Storage {
    paths: ExpensePaths,
    pub expenses: ExpenseRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: ExpensePaths) -> Result<Self, ExpenseError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), ExpenseError> {
        self.expenses.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), ExpenseError> {
        self.expenses.save()
    }

    /// Check if storage has been initialized (settings written)
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record a newly stored expense in the audit log
    pub fn log_create(&self, expense: &Expense) -> Result<(), ExpenseError> {
        self.audit.log(&AuditEntry::create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.title.clone()),
            expense,
        ))
    }

    /// Record an edit, with an optional change summary
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), ExpenseError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    /// Record a removed expense in the audit log
    pub fn log_delete(&self, expense: &Expense) -> Result<(), ExpenseError> {
        self.audit.log(&AuditEntry::delete(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.title.clone()),
            expense,
        ))
    }

    /// Record freshly written settings
    pub fn log_settings_created<T: Serialize>(&self, settings: &T) -> Result<(), ExpenseError> {
        self.audit.log(&AuditEntry::create(
            EntityType::Settings,
            "config",
            None,
            settings,
        ))
    }
}
