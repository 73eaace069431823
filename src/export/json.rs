//! JSON export
//!
//! Exports the whole store to one JSON document with a schema version.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{SetAsideError, SetAsideResult};
use crate::models::{BudgetProfile, Category, FutureExpense, Transaction};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full store export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub profile: BudgetProfile,

    pub categories: Vec<Category>,

    pub transactions: Vec<Transaction>,

    pub future_expenses: Vec<FutureExpense>,

    pub metadata: ExportMetadata,
}

/// Counts and date range, for a quick look at an export file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub category_count: usize,
    pub future_expense_count: usize,
    pub earliest_transaction: Option<String>,
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Snapshot everything in storage
    pub fn from_storage(storage: &Storage) -> SetAsideResult<Self> {
        let profile = storage.profile.get()?;
        let categories = storage.categories.get_all()?;
        let transactions = storage.transactions.get_all()?;
        let future_expenses = storage.future_expenses.get_all()?;

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            category_count: categories.len(),
            future_expense_count: future_expenses.len(),
            earliest_transaction: transactions.iter().map(|t| t.date).min().map(|d| d.to_string()),
            latest_transaction: transactions.iter().map(|t| t.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            profile,
            categories,
            transactions,
            future_expenses,
            metadata,
        })
    }
}

/// Export the full store as JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: &mut W, pretty: bool) -> SetAsideResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| SetAsideError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| SetAsideError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SetAsidePaths;
    use crate::models::{EntryKind, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SetAsidePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_json_export_contents() {
        let (_temp_dir, storage) = create_test_storage();
        let early = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        let late = NaiveDate::from_ymd_opt(2025, 2, 9).unwrap();

        storage
            .transactions
            .upsert(Transaction::new(EntryKind::Expense, Money::from_cents(100), early))
            .unwrap();
        storage
            .transactions
            .upsert(Transaction::new(EntryKind::Income, Money::from_cents(900), late))
            .unwrap();
        storage
            .future_expenses
            .upsert(FutureExpense::new("Tyres", Money::from_cents(40000), late))
            .unwrap();

        let mut buffer = Vec::new();
        export_full_json(&storage, &mut buffer, true).unwrap();

        let parsed: FullExport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(parsed.transactions.len(), 2);
        assert_eq!(parsed.future_expenses[0].name, "Tyres");
        assert_eq!(parsed.metadata.earliest_transaction.as_deref(), Some("2025-01-03"));
        assert_eq!(parsed.metadata.latest_transaction.as_deref(), Some("2025-02-09"));
    }

    #[test]
    fn test_empty_export() {
        let (_temp_dir, storage) = create_test_storage();
        let export = FullExport::from_storage(&storage).unwrap();

        assert_eq!(export.metadata.transaction_count, 0);
        assert!(export.metadata.earliest_transaction.is_none());
    }
}
