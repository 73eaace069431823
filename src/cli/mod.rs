//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod category;
pub mod export;
pub mod future;
pub mod settings;
pub mod setup;
pub mod stats;
pub mod transaction;

pub use audit::{handle_audit_command, AuditArgs};
pub use category::{handle_category_command, CategoryCommands};
pub use export::{handle_export_command, ExportCommands};
pub use future::{handle_future_command, FutureCommands};
pub use settings::{handle_settings_command, SettingsCommands};
pub use setup::{handle_setup_command, SetupCommands};
pub use stats::{handle_stats_command, StatsCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{SetAsideError, SetAsideResult};
use crate::models::{CategoryId, Money};
use crate::services::CategoryService;
use crate::storage::Storage;

/// Today's date in local time
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a `YYYY-MM` month argument
pub(crate) fn parse_month(raw: &str) -> SetAsideResult<(i32, u32)> {
    let invalid = || SetAsideError::Validation(format!("Invalid month '{}'. Use YYYY-MM", raw));

    let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

/// Parse a non-negative amount for budget setup
pub(crate) fn parse_amount(raw: &str) -> SetAsideResult<Money> {
    Money::parse(raw).map_err(|e| {
        SetAsideError::Validation(format!(
            "Invalid amount '{}'. Use a format like '1250.00'. Error: {}",
            raw, e
        ))
    })
}

/// Resolve an optional category argument to its ID
pub(crate) fn resolve_category(
    storage: &Storage,
    category: Option<&str>,
) -> SetAsideResult<Option<CategoryId>> {
    category
        .map(|c| CategoryService::new(storage).resolve(c).map(|c| c.id))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-03").unwrap(), (2025, 3));
        assert_eq!(parse_month(" 2024-12 ").unwrap(), (2024, 12));
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("March").is_err());
        assert!(parse_month("2025").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12,50").unwrap(), Money::from_cents(1250));
        assert!(parse_amount("abc").unwrap_err().is_validation());
    }
}
