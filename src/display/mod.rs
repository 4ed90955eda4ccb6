//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses and reports for terminal
//! display, including tables, bar charts and share text.

pub mod expense;
pub mod report;

pub use expense::{format_expense_details, format_expense_list, format_grouped_list};
pub use report::{
    chart_points, format_bar_chart, format_daily_summary, format_weekly_report, share_text,
    ChartPoint,
};
