//! Display formatting for terminal output
//!
//! Turns models and service results into plain text for the CLI. Amounts
//! carry the currency symbol from the user's settings.

pub mod category;
pub mod dashboard;
pub mod future_expense;
pub mod profile;
pub mod transaction;

pub use category::{format_category_details, format_category_list};
pub use dashboard::format_dashboard;
pub use future_expense::{format_future_expense_details, format_future_expense_list};
pub use profile::format_profile;
pub use transaction::{format_transaction_details, format_transaction_register};

use crate::models::Urgency;

/// Pad or cut a string to exactly `max_len` characters
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Format a separator line
pub(crate) fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Short marker for how close a due date is
pub(crate) fn urgency_marker(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Normal => " ",
        Urgency::Soon => "!",
        Urgency::Due => "‼",
    }
}
