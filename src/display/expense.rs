//! Expense display formatting
//!
//! Formats expenses for terminal output in table, grouped and detail views.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::{Expense, Money};
use crate::services::ExpenseGroup;

use super::report::truncate;

const TITLE_WIDTH: usize = 28;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl ExpenseRow {
    fn new(expense: &Expense, settings: &Settings) -> Self {
        Self {
            id: expense.id.to_string(),
            date: expense
                .created_at
                .format(&format!("{} %H:%M", settings.date_format))
                .to_string(),
            title: truncate(&expense.title, TITLE_WIDTH),
            category: expense.category.labeled(),
            amount: settings.format_money(expense.amount),
        }
    }
}

fn render_table(expenses: &[Expense], settings: &Settings) -> String {
    let rows: Vec<_> = expenses
        .iter()
        .map(|e| ExpenseRow::new(e, settings))
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::last(), Alignment::right());
    table.to_string()
}

/// Format a list of expenses as a table with a total line
pub fn format_expense_list(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    format!(
        "{}\n{} expense(s), total {}",
        render_table(expenses, settings),
        expenses.len(),
        settings.format_money(total)
    )
}

/// Format grouped expenses, one table per group
pub fn format_grouped_list(groups: &[ExpenseGroup], settings: &Settings) -> String {
    if groups.is_empty() {
        return "No expenses found.".to_string();
    }

    groups
        .iter()
        .map(|group| {
            format!(
                "{} ({})\n{}",
                group.label,
                settings.format_money(group.total),
                render_table(&group.expenses, settings)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:  {}\n", expense.id));
    output.push_str(&format!("Title:    {}\n", expense.title));
    output.push_str(&format!("Amount:   {}\n", settings.format_money(expense.amount)));
    output.push_str(&format!("Category: {}\n", expense.category.labeled()));

    if !expense.notes.is_empty() {
        output.push_str(&format!("Notes:    {}\n", expense.notes));
    }
    if let Some(receipt) = &expense.receipt {
        output.push_str(&format!("Receipt:  {}\n", receipt));
    }

    output.push_str(&format!(
        "Created:  {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M:%S")
    ));
    if expense.updated_at != expense.created_at {
        output.push_str(&format!(
            "Updated:  {}\n",
            expense.updated_at.format("%Y-%m-%d %H:%M:%S")
        ));
    }

    output
}
