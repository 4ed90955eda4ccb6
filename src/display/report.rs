//! Report formatting for terminal output
//!
//! Renders weekly reports and daily summaries, the plain-text share
//! message, and a daily bar chart.

use chrono::NaiveDate;

use crate::config::Settings;
use crate::models::{ExpenseCategory, ExpenseSummary, Money, WeeklyReport};

const REPORT_WIDTH: usize = 60;
const BAR_WIDTH: usize = 30;

/// One bar of the daily chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// Short label such as "Jan 1"
    pub label: String,
    pub amount: Money,
    pub date: NaiveDate,
}

/// Chart points for every day of the report, oldest first
pub fn chart_points(report: &WeeklyReport) -> Vec<ChartPoint> {
    report
        .daily_summaries
        .iter()
        .map(|summary| ChartPoint {
            label: summary.date.format("%b %-d").to_string(),
            amount: summary.total_amount,
            date: summary.date,
        })
        .collect()
}

/// Render chart points as horizontal bars scaled to the largest day
pub fn format_bar_chart(points: &[ChartPoint], settings: &Settings) -> String {
    let max = points
        .iter()
        .map(|p| p.amount)
        .max()
        .unwrap_or_default()
        .as_f64();
    let label_width = points.iter().map(|p| p.label.len()).max().unwrap_or(0);

    points
        .iter()
        .map(|p| {
            format!(
                "{:<label_width$}  {}  {}\n",
                p.label,
                format_bar(p.amount.as_f64(), max, BAR_WIDTH),
                settings.format_money(p.amount),
                label_width = label_width,
            )
        })
        .collect()
}

/// Format the weekly report for terminal display
pub fn format_weekly_report(report: &WeeklyReport, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Expense Report: {} to {}\n",
        report.start_date, report.end_date
    ));
    output.push_str(&double_separator(REPORT_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "Total Amount:   {}\n",
        settings.format_money(report.total_amount)
    ));
    output.push_str(&format!("Total Expenses: {}\n", report.total_expenses));
    output.push_str(&format!(
        "Daily Average:  {}\n",
        settings.format_money(report.daily_average())
    ));
    if let Some(busiest) = report.busiest_day() {
        output.push_str(&format!(
            "Busiest Day:    {} ({})\n",
            busiest.date.format("%a %b %-d"),
            settings.format_money(busiest.total_amount)
        ));
    }

    output.push_str("\nDaily Totals\n");
    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');
    output.push_str(&format_bar_chart(&chart_points(report), settings));

    output.push_str("\nBy Category\n");
    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');
    if report.category_summaries.is_empty() {
        output.push_str("No expenses in this period.\n");
    }
    for summary in &report.category_summaries {
        output.push_str(&format!(
            "{:<16} {:>14} {:>6} {:>8}\n",
            summary.category.labeled(),
            settings.format_money(summary.total_amount),
            summary.expense_count,
            format_percentage(summary.percentage)
        ));
    }

    output
}

/// Format a single day's summary
pub fn format_daily_summary(summary: &ExpenseSummary, settings: &Settings) -> String {
    let mut output = format!(
        "{}: {} across {} expense(s)\n",
        summary.date.format("%A, %B %-d %Y"),
        settings.format_money(summary.total_amount),
        summary.expense_count
    );

    for category in ExpenseCategory::ALL {
        if let Some(amount) = summary.category_breakdown.get(&category) {
            output.push_str(&format!(
                "  {:<16} {:>14}\n",
                category.labeled(),
                settings.format_money(*amount)
            ));
        }
    }

    output
}

/// Plain-text message suitable for pasting into chat or email
pub fn share_text(report: &WeeklyReport, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str("📊 Weekly Expense Report\n");
    output.push_str(&format!(
        "Period: {} to {}\n\n",
        report.start_date, report.end_date
    ));
    output.push_str(&format!(
        "💰 Total Amount: {}\n",
        settings.format_money(report.total_amount)
    ));
    output.push_str(&format!("📝 Total Expenses: {}\n\n", report.total_expenses));
    output.push_str("📈 Category Breakdown:\n");

    for summary in &report.category_summaries {
        output.push_str(&format!(
            "{}: {} ({:.2}%)\n",
            summary.category.labeled(),
            settings.format_money(summary.total_amount),
            summary.percentage
        ));
    }

    output
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to at most `max_len` characters, marking the cut
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
