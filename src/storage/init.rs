//! Storage initialization
//!
//! First-run setup and optional sample data

use chrono::{Duration, Local, NaiveDateTime};
use tracing::info;

use crate::config::{ExpensePaths, Settings};
use crate::error::ExpenseError;
use crate::models::{Expense, ExpenseCategory, Money};

use super::Storage;

/// Initialize storage for a fresh installation
///
/// Creates the directory layout and writes default settings. Existing
/// settings are left alone. Returns true if settings were created.
pub fn initialize_storage(paths: &ExpensePaths) -> Result<bool, ExpenseError> {
    paths.ensure_directories()?;

    if paths.settings_file().exists() {
        return Ok(false);
    }

    Settings::default().save(paths)?;
    info!(base_dir = %paths.base_dir().display(), "initialized expense tracker");
    Ok(true)
}

/// The five demonstration expenses, timestamped relative to `now`
pub fn sample_expenses(now: NaiveDateTime) -> Vec<Expense> {
    vec![
        Expense::new(
            "Team lunch",
            Money::from_units(250),
            ExpenseCategory::Food,
            now - Duration::hours(1),
        )
        .with_notes("Team lunch at nearby restaurant"),
        Expense::new(
            "Client meeting transport",
            Money::from_units(120),
            ExpenseCategory::Travel,
            now - Duration::hours(2),
        )
        .with_notes("Client meeting transportation"),
        Expense::new(
            "Performance bonus",
            Money::from_units(500),
            ExpenseCategory::Staff,
            now - Duration::days(1),
        )
        .with_notes("Performance bonus for team member"),
        Expense::new(
            "Office supplies",
            Money::from_units(85),
            ExpenseCategory::Utility,
            now - Duration::hours(3),
        )
        .with_notes("Printer paper and stationery"),
        Expense::new(
            "Monthly salary - John",
            Money::from_units(3500),
            ExpenseCategory::Staff,
            now - Duration::days(2),
        )
        .with_notes("Software developer salary"),
    ]
}

/// Insert the sample expenses only when the store is empty
///
/// Returns how many expenses were added.
pub fn seed_sample_data(storage: &Storage) -> Result<usize, ExpenseError> {
    if storage.expenses.count()? > 0 {
        return Ok(0);
    }

    let samples = sample_expenses(Local::now().naive_local());
    let count = samples.len();
    for expense in samples {
        let id = storage.expenses.insert(expense)?;
        if let Some(stored) = storage.expenses.get(id)? {
            storage.log_create(&stored)?;
        }
    }
    storage.expenses.save()?;

    info!(count, "seeded sample expenses");
    Ok(count)
}
