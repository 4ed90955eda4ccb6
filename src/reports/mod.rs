//! Reports for the expense tracker
//!
//! Pure functions over expense lists: a single-day summary and a
//! multi-day report with per-category percentages.

pub mod daily;
pub mod weekly;

pub use daily::summary_for_date;
pub use weekly::{build_weekly_report, window_ending};
