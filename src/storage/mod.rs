//! Storage layer for SetAside
//!
//! JSON file storage with atomic writes. `Storage` holds every repository in
//! memory and is the one place services read from and write to.

pub mod categories;
pub mod file_io;
pub mod future_expenses;
pub mod init;
pub mod profile;
pub mod transactions;

pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use future_expenses::FutureExpenseRepository;
pub use init::initialize_storage;
pub use profile::ProfileRepository;
pub use transactions::TransactionRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::SetAsidePaths;
use crate::error::SetAsideError;
use crate::models::BudgetProfile;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: SetAsidePaths,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
    pub future_expenses: FutureExpenseRepository,
    pub profile: ProfileRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: SetAsidePaths) -> Result<Self, SetAsideError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            future_expenses: FutureExpenseRepository::new(paths.future_expenses_file()),
            profile: ProfileRepository::new(paths.profile_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &SetAsidePaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), SetAsideError> {
        self.transactions.load()?;
        self.categories.load()?;
        self.future_expenses.load()?;
        self.profile.load()?;
        tracing::debug!(base = %self.paths.base_dir().display(), "storage loaded");
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), SetAsideError> {
        self.transactions.save()?;
        self.categories.save()?;
        self.future_expenses.save()?;
        self.profile.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.categories_file().exists()
    }

    /// Wipe transactions, future expenses and the profile; reseed categories
    ///
    /// Settings and the audit log are kept.
    pub fn reset(&self) -> Result<(), SetAsideError> {
        self.transactions.clear()?;
        self.future_expenses.clear()?;
        self.profile.set(BudgetProfile::default())?;
        self.categories
            .replace_all(crate::models::category::default_categories())?;
        self.save_all()?;

        tracing::warn!("all budget data was reset");
        Ok(())
    }

    /// Log a create operation
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), SetAsideError> {
        let entry = AuditEntry::create(entity_type, entity_id, entity_name, entity);
        self.audit.log(&entry)
    }

    /// Log an update operation
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), SetAsideError> {
        let entry = AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        );
        self.audit.log(&entry)
    }

    /// Log a delete operation
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), SetAsideError> {
        let entry = AuditEntry::delete(entity_type, entity_id, entity_name, entity);
        self.audit.log(&entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryKind, FutureExpense, Money, Transaction};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SetAsidePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_storage();
        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_save_all_and_reload() {
        let (temp_dir, storage) = create_storage();
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        storage
            .transactions
            .upsert(Transaction::new(EntryKind::Expense, Money::from_cents(990), date))
            .unwrap();
        storage
            .future_expenses
            .upsert(FutureExpense::new("Tyres", Money::from_cents(40000), date))
            .unwrap();
        storage.save_all().unwrap();

        let paths = SetAsidePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        assert_eq!(reopened.transactions.count().unwrap(), 1);
        assert_eq!(reopened.future_expenses.count().unwrap(), 1);
    }

    #[test]
    fn test_reset_keeps_default_categories() {
        let (_temp_dir, storage) = create_storage();
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        storage
            .transactions
            .upsert(Transaction::new(EntryKind::Expense, Money::from_cents(990), date))
            .unwrap();

        storage.reset().unwrap();

        assert_eq!(storage.transactions.count().unwrap(), 0);
        assert_eq!(storage.categories.count().unwrap(), 10);
        assert!(storage.is_initialized());
    }

    #[test]
    fn test_audit_helpers_write_log() {
        let (_temp_dir, storage) = create_storage();
        let expense = FutureExpense::new(
            "Tyres",
            Money::from_cents(40000),
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
        );
        storage
            .log_create(
                EntityType::FutureExpense,
                expense.id.to_string(),
                Some(expense.name.clone()),
                &expense,
            )
            .unwrap();
        storage
            .log_delete(EntityType::FutureExpense, expense.id.to_string(), None, &expense)
            .unwrap();

        assert_eq!(storage.audit().read_all().unwrap().len(), 2);
    }
}
