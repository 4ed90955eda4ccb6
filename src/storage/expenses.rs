//! Expense repository
//!
//! Holds the authoritative expense list in memory, most recent first, and
//! persists it to expenses.json. Every change is republished to live views.

use std::path::PathBuf;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::ExpenseError;
use crate::models::{Expense, ExpenseCategory, ExpenseId, Money};

use super::file_io::{read_json, write_json_atomic};
use super::view::{ExpenseSelector, ExpenseView, Snapshot};

/// Serializable expense data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ExpenseData {
    /// Next ID to hand out; kept so IDs of deleted records are never reused
    #[serde(default)]
    next_id: ExpenseId,
    expenses: Vec<Expense>,
}

#[derive(Debug)]
struct Ledger {
    expenses: Vec<Expense>,
    next_id: ExpenseId,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            expenses: Vec::new(),
            next_id: ExpenseId::new(1),
        }
    }
}

impl Ledger {
    fn sort(&mut self) {
        self.expenses
            .sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
}

/// Repository for expense persistence and live queries
pub struct ExpenseRepository {
    path: PathBuf,
    ledger: RwLock<Ledger>,
    publisher: watch::Sender<Snapshot>,
}

impl ExpenseRepository {
    /// Create a new, empty expense repository backed by `path`
    pub fn new(path: PathBuf) -> Self {
        let (publisher, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            path,
            ledger: RwLock::new(Ledger::default()),
            publisher,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Ledger>, ExpenseError> {
        self.ledger
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Ledger>, ExpenseError> {
        self.ledger
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    fn publish(&self, ledger: &Ledger) {
        self.publisher
            .send_replace(Arc::new(ledger.expenses.clone()));
    }

    /// Load expenses from disk, replacing whatever is in memory
    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: ExpenseData = read_json(&self.path)?;
        let mut ledger = self.write()?;

        let after_highest = file_data
            .expenses
            .iter()
            .map(|e| e.id)
            .max()
            .unwrap_or(ExpenseId::UNASSIGNED)
            .next();

        ledger.next_id = file_data.next_id.max(after_highest);
        ledger.expenses = file_data.expenses;
        ledger.sort();

        debug!(count = ledger.expenses.len(), path = %self.path.display(), "loaded expenses");
        self.publish(&ledger);
        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), ExpenseError> {
        let ledger = self.read()?;
        let file_data = ExpenseData {
            next_id: ledger.next_id,
            expenses: ledger.expenses.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Append an expense under the next sequential ID and return that ID
    ///
    /// Any ID already on `expense` is ignored. Validation is the caller's job.
    pub fn insert(&self, mut expense: Expense) -> Result<ExpenseId, ExpenseError> {
        let mut ledger = self.write()?;

        let id = ledger.next_id;
        ledger.next_id = id.next();
        expense.id = id;

        ledger.expenses.push(expense);
        ledger.sort();
        self.publish(&ledger);

        info!(%id, "inserted expense");
        Ok(id)
    }

    /// Replace the stored expense that has the same ID
    ///
    /// Returns false, leaving the store untouched, when no record matches.
    pub fn update(&self, expense: Expense) -> Result<bool, ExpenseError> {
        let mut ledger = self.write()?;

        let Some(slot) = ledger.expenses.iter_mut().find(|e| e.id == expense.id) else {
            debug!(id = %expense.id, "update skipped, no such expense");
            return Ok(false);
        };

        let id = expense.id;
        *slot = expense;
        ledger.sort();
        self.publish(&ledger);

        info!(%id, "updated expense");
        Ok(true)
    }

    /// Remove the stored record matching `expense`'s ID
    pub fn delete(&self, expense: &Expense) -> Result<bool, ExpenseError> {
        self.delete_by_id(expense.id)
    }

    /// Remove the expense with `id`; returns false when nothing matched
    pub fn delete_by_id(&self, id: ExpenseId) -> Result<bool, ExpenseError> {
        let mut ledger = self.write()?;

        let before = ledger.expenses.len();
        ledger.expenses.retain(|e| e.id != id);
        if ledger.expenses.len() == before {
            debug!(%id, "delete skipped, no such expense");
            return Ok(false);
        }

        self.publish(&ledger);
        info!(%id, "deleted expense");
        Ok(true)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, ExpenseError> {
        let ledger = self.read()?;
        Ok(ledger.expenses.iter().find(|e| e.id == id).cloned())
    }

    /// Expenses matching `selector`, most recent first
    pub fn query(&self, selector: ExpenseSelector) -> Result<Vec<Expense>, ExpenseError> {
        let ledger = self.read()?;
        Ok(selector.apply(&ledger.expenses))
    }

    pub fn query_all(&self) -> Result<Vec<Expense>, ExpenseError> {
        self.query(ExpenseSelector::All)
    }

    pub fn query_by_date(&self, date: NaiveDate) -> Result<Vec<Expense>, ExpenseError> {
        self.query(ExpenseSelector::Date(date))
    }

    pub fn query_by_category(
        &self,
        category: ExpenseCategory,
    ) -> Result<Vec<Expense>, ExpenseError> {
        self.query(ExpenseSelector::Category(category))
    }

    /// Expenses whose date lies in `[start, end]`
    pub fn query_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>, ExpenseError> {
        self.query(ExpenseSelector::Range(start, end))
    }

    /// Subscribe to a live view of the expenses matching `selector`
    pub fn observe(&self, selector: ExpenseSelector) -> ExpenseView {
        ExpenseView::new(self.publisher.subscribe(), selector)
    }

    pub fn observe_all(&self) -> ExpenseView {
        self.observe(ExpenseSelector::All)
    }

    pub fn observe_by_date(&self, date: NaiveDate) -> ExpenseView {
        self.observe(ExpenseSelector::Date(date))
    }

    pub fn observe_by_category(&self, category: ExpenseCategory) -> ExpenseView {
        self.observe(ExpenseSelector::Category(category))
    }

    pub fn observe_by_range(&self, start: NaiveDate, end: NaiveDate) -> ExpenseView {
        self.observe(ExpenseSelector::Range(start, end))
    }

    /// Sum of the amounts recorded on `date` (zero if none)
    pub fn total_amount_for_date(&self, date: NaiveDate) -> Result<Money, ExpenseError> {
        let ledger = self.read()?;
        Ok(ledger
            .expenses
            .iter()
            .filter(|e| e.is_on(date))
            .map(|e| e.amount)
            .sum())
    }

    pub fn count_for_date(&self, date: NaiveDate) -> Result<usize, ExpenseError> {
        let ledger = self.read()?;
        Ok(ledger.expenses.iter().filter(|e| e.is_on(date)).count())
    }

    pub fn total_amount_for_today(&self) -> Result<Money, ExpenseError> {
        self.total_amount_for_date(Local::now().date_naive())
    }

    pub fn count_for_today(&self) -> Result<usize, ExpenseError> {
        self.count_for_date(Local::now().date_naive())
    }

    /// Count all expenses
    pub fn count(&self) -> Result<usize, ExpenseError> {
        Ok(self.read()?.expenses.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        (temp_dir, repo)
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn expense(title: &str, units: i64, category: ExpenseCategory, created: NaiveDateTime) -> Expense {
        Expense::new(title, Money::from_units(units), category, created)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let (_temp_dir, repo) = create_test_repo();

        let mut previous = ExpenseId::UNASSIGNED;
        for day in 1..=5 {
            let id = repo
                .insert(expense("Coffee", 3, ExpenseCategory::Food, at(day, 9)))
                .unwrap();
            assert!(id > previous);
            previous = id;
        }
        assert_eq!(previous, ExpenseId::new(5));
    }

    #[test]
    fn test_insert_ignores_caller_id() {
        let (_temp_dir, repo) = create_test_repo();
        let mut candidate = expense("Taxi", 20, ExpenseCategory::Travel, at(1, 9));
        candidate.id = ExpenseId::new(99);

        let id = repo.insert(candidate).unwrap();
        assert_eq!(id, ExpenseId::new(1));
        assert!(repo.get(ExpenseId::new(99)).unwrap().is_none());
    }

    #[test]
    fn test_query_all_sorted_most_recent_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(expense("Middle", 1, ExpenseCategory::Food, at(2, 12))).unwrap();
        repo.insert(expense("Newest", 1, ExpenseCategory::Food, at(3, 8))).unwrap();
        let id = repo.insert(expense("Oldest", 1, ExpenseCategory::Food, at(1, 18))).unwrap();

        let all = repo.query_all().unwrap();
        let titles: Vec<_> = all.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
        assert!(all.iter().any(|e| e.id == id));
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn test_filtered_queries() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(expense("Lunch", 250, ExpenseCategory::Food, at(1, 13))).unwrap();
        repo.insert(expense("Dinner", 400, ExpenseCategory::Food, at(1, 20))).unwrap();
        repo.insert(expense("Flight", 9000, ExpenseCategory::Travel, at(3, 6))).unwrap();
        repo.insert(expense("Salary", 50000, ExpenseCategory::Staff, at(10, 9))).unwrap();

        assert_eq!(repo.query_by_date(jan(1)).unwrap().len(), 2);
        assert!(repo.query_by_date(jan(2)).unwrap().is_empty());
        assert_eq!(repo.query_by_category(ExpenseCategory::Food).unwrap().len(), 2);
        assert!(repo.query_by_category(ExpenseCategory::Utility).unwrap().is_empty());

        let range = repo.query_by_date_range(jan(1), jan(3)).unwrap();
        assert_eq!(range.len(), 3);
        assert_eq!(range[0].title, "Flight");

        assert_eq!(repo.total_amount_for_date(jan(1)).unwrap(), Money::from_units(650));
        assert_eq!(repo.total_amount_for_date(jan(2)).unwrap(), Money::zero());
        assert_eq!(repo.count_for_date(jan(1)).unwrap(), 2);
    }

    #[test]
    fn test_today_helpers() {
        let (_temp_dir, repo) = create_test_repo();
        let now = Local::now().naive_local();
        repo.insert(expense("Snacks", 12, ExpenseCategory::Food, now)).unwrap();
        repo.insert(expense("Old", 99, ExpenseCategory::Food, at(1, 9))).unwrap();

        assert_eq!(repo.count_for_today().unwrap(), 1);
        assert_eq!(repo.total_amount_for_today().unwrap(), Money::from_units(12));
    }

    #[test]
    fn test_update_replaces_matching_record() {
        let (_temp_dir, repo) = create_test_repo();
        let id = repo.insert(expense("Lunch", 250, ExpenseCategory::Food, at(1, 13))).unwrap();

        let mut changed = repo.get(id).unwrap().unwrap();
        changed.category = ExpenseCategory::Staff;
        assert!(repo.update(changed).unwrap());

        let stored = repo.get(id).unwrap().unwrap();
        assert_eq!(stored.category, ExpenseCategory::Staff);
        assert_eq!(stored.created_at, at(1, 13));
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(expense("Lunch", 250, ExpenseCategory::Food, at(1, 13))).unwrap();

        let mut stranger = expense("Ghost", 1, ExpenseCategory::Food, at(1, 1));
        stranger.id = ExpenseId::new(42);
        assert!(!repo.update(stranger).unwrap());

        let all = repo.query_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Lunch");
    }

    #[test]
    fn test_delete_and_idempotent_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let keep = repo.insert(expense("Keep", 1, ExpenseCategory::Food, at(1, 9))).unwrap();
        let drop = repo.insert(expense("Drop", 1, ExpenseCategory::Food, at(1, 10))).unwrap();

        let stored = repo.get(drop).unwrap().unwrap();
        assert!(repo.delete(&stored).unwrap());
        assert!(repo.query_all().unwrap().iter().all(|e| e.id != drop));

        let before = repo.query_all().unwrap();
        assert!(!repo.delete_by_id(drop).unwrap());
        assert!(!repo.delete_by_id(ExpenseId::new(1234)).unwrap());
        assert_eq!(repo.query_all().unwrap(), before);
        assert!(repo.get(keep).unwrap().is_some());
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let first = repo.insert(expense("A", 1, ExpenseCategory::Food, at(1, 9))).unwrap();
        let second = repo.insert(expense("B", 1, ExpenseCategory::Food, at(1, 9))).unwrap();
        repo.delete_by_id(second).unwrap();

        let third = repo.insert(expense("C", 1, ExpenseCategory::Food, at(1, 9))).unwrap();
        assert!(third > second);
        assert!(second > first);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.insert(expense("A", 5, ExpenseCategory::Utility, at(1, 9))).unwrap();
        let deleted = repo.insert(expense("B", 6, ExpenseCategory::Utility, at(2, 9))).unwrap();
        repo.delete_by_id(deleted).unwrap();
        repo.save().unwrap();

        let repo2 = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.count().unwrap(), 1);

        let next = repo2.insert(expense("C", 7, ExpenseCategory::Utility, at(3, 9))).unwrap();
        assert_eq!(next, ExpenseId::new(3));
    }

    #[test]
    fn test_observers_receive_each_mutation() {
        let (_temp_dir, repo) = create_test_repo();
        let mut all = repo.observe_all();
        let mut food = repo.observe_by_category(ExpenseCategory::Food);
        let mut day_three = repo.observe_by_date(jan(3));
        let range = repo.observe_by_range(jan(1), jan(2));

        assert!(all.latest().is_empty());

        let id = repo.insert(expense("Lunch", 250, ExpenseCategory::Food, at(1, 13))).unwrap();
        assert_eq!(all.poll().unwrap().len(), 1);
        assert_eq!(food.poll().unwrap()[0].id, id);
        assert!(day_three.poll().unwrap().is_empty());
        assert_eq!(range.latest().len(), 1);

        repo.insert(expense("Train", 30, ExpenseCategory::Travel, at(3, 7))).unwrap();
        assert_eq!(all.poll().unwrap().len(), 2);
        assert_eq!(food.poll().unwrap().len(), 1);
        assert_eq!(day_three.poll().unwrap()[0].title, "Train");

        repo.delete_by_id(id).unwrap();
        assert!(food.poll().unwrap().is_empty());
        assert!(range.latest().is_empty());

        // A miss changes nothing, so nothing new is published
        repo.delete_by_id(id).unwrap();
        assert!(all.poll().is_none());
    }

    #[test]
    fn test_late_subscriber_sees_current_snapshot() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(expense("Lunch", 250, ExpenseCategory::Food, at(1, 13))).unwrap();

        let view = repo.observe_all();
        assert_eq!(view.latest().len(), 1);
        assert!(!view.has_changed());
    }

    #[tokio::test]
    async fn test_async_observer_wakes_on_change() {
        let (_temp_dir, repo) = create_test_repo();
        let mut view = repo.observe_by_category(ExpenseCategory::Travel);

        repo.insert(expense("Bus", 2, ExpenseCategory::Travel, at(4, 8))).unwrap();

        let latest = view.changed().await.unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].title, "Bus");
    }
}
