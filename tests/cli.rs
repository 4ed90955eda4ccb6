use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn expense(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expense").unwrap();
    cmd.env("EXPENSE_TRACKER_DATA_DIR", data_dir.path())
        .env_remove("EXPENSE_TRACKER_LOG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn init_with_samples_then_list() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["init", "--sample"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created default settings."))
        .stdout(predicate::str::contains("Added 5 sample expenses."));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("expenses.json").exists());

    expense(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Team lunch"))
        .stdout(predicate::str::contains("Monthly salary - John"))
        .stdout(predicate::str::contains("5 expense(s)"));

    expense(&dir)
        .args(["init", "--sample"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"))
        .stdout(predicate::str::contains("no samples added"));
}

#[test]
fn add_refuses_duplicate_without_force() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["add", "Lunch", "250", "--category", "food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded expense:"))
        .stdout(predicate::str::contains("₹250.00"));

    expense(&dir)
        .args(["add", "Lunch", "250", "--category", "food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    expense(&dir)
        .args(["add", "Lunch", "251", "--category", "food"])
        .assert()
        .success();

    expense(&dir)
        .args(["add", "Lunch", "250", "--category", "food", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("across 3 expense(s)"));
}

#[test]
fn add_rejects_invalid_input() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["add", "   ", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title cannot be blank"));

    expense(&dir)
        .args(["add", "Tea", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));

    expense(&dir)
        .args(["add", "Plant", "500000000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot exceed"));

    expense(&dir)
        .args(["add", "Tea", "10", "--category", "rent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category"));

    expense(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));
}

#[test]
fn edit_show_and_delete() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["add", "Cab", "90", "-c", "travel", "-n", "Airport run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exp-1"));

    expense(&dir)
        .args(["edit", "exp-1", "--category", "staff", "--amount", "95.50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Staff"))
        .stdout(predicate::str::contains("₹95.50"));

    expense(&dir)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Notes:    Airport run"))
        .stdout(predicate::str::contains("Updated:"));

    expense(&dir)
        .args(["delete", "exp-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Use --force"));

    expense(&dir)
        .args(["delete", "exp-1", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted expense: exp-1"));

    expense(&dir)
        .args(["delete", "exp-1", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expense exp-1 to delete."));

    expense(&dir)
        .args(["show", "exp-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    expense(&dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Expense exp-1 (Cab)"))
        .stdout(predicate::str::contains("UPDATE Expense exp-1"))
        .stdout(predicate::str::contains("DELETE Expense exp-1"));
}

#[test]
fn reports_cover_today() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["add", "Lunch", "100", "-c", "food"])
        .assert()
        .success();
    expense(&dir)
        .args(["add", "Cab", "50", "-c", "travel"])
        .assert()
        .success();

    expense(&dir)
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Amount:   ₹150.00"))
        .stdout(predicate::str::contains("Total Expenses: 2"))
        .stdout(predicate::str::contains("67%"));

    expense(&dir)
        .args(["report", "--share"])
        .assert()
        .success()
        .stdout(predicate::str::contains("📊 Weekly Expense Report"))
        .stdout(predicate::str::contains("(66.67%)"))
        .stdout(predicate::str::contains("(33.33%)"));

    expense(&dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("₹150.00 across 2 expense(s)"));

    expense(&dir)
        .arg("today")
        .assert()
        .success()
        .stdout(predicate::str::contains("Today's total: ₹150.00 (2 expense(s))"));
}

#[test]
fn report_rejects_inverted_range() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["report", "--from", "2024-01-07", "--to", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));

    expense(&dir)
        .args(["report", "--from", "2024-01-01", "--to", "2024-01-07"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense Report: 2024-01-01 to 2024-01-07"))
        .stdout(predicate::str::contains("No expenses in this period."));
}

#[test]
fn config_shows_paths_and_defaults() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Currency symbol:    ₹"))
        .stdout(predicate::str::contains("Report window:      7 days"));
}
