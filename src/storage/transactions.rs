//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::SetAsideError;
use crate::models::{CategoryId, Transaction, TransactionId};

use super::file_io::{read_json, read_lock, write_json_atomic, write_lock};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct TransactionData {
    pub transactions: Vec<Transaction>,
}

/// Newest first; same-day entries by creation time
fn newest_first(a: &Transaction, b: &Transaction) -> std::cmp::Ordering {
    b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at))
}

/// Repository for transaction persistence with a category index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: category_id -> transaction_ids
    by_category: RwLock<HashMap<CategoryId, Vec<TransactionId>>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build the index
    pub fn load(&self) -> Result<(), SetAsideError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = write_lock(&self.data)?;
        let mut by_category = write_lock(&self.by_category)?;

        data.clear();
        by_category.clear();

        for txn in file_data.transactions {
            if let Some(cat_id) = txn.category_id {
                by_category.entry(cat_id).or_default().push(txn.id);
            }
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), SetAsideError> {
        let data = read_lock(&self.data)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(newest_first);

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, SetAsideError> {
        let data = read_lock(&self.data)?;

        Ok(data.get(&id).cloned())
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, SetAsideError> {
        let data = read_lock(&self.data)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }

    /// Get transactions in a category, newest first
    pub fn get_by_category(&self, category_id: CategoryId) -> Result<Vec<Transaction>, SetAsideError> {
        let data = read_lock(&self.data)?;
        let by_category = read_lock(&self.by_category)?;

        let ids = by_category.get(&category_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }

    /// Get transactions in an inclusive date range, newest first
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, SetAsideError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|t| t.date >= start && t.date <= end)
            .collect())
    }

    /// Transactions whose ID matches a full ID, display ID or prefix
    pub fn find_by_id_prefix(&self, input: &str) -> Result<Vec<Transaction>, SetAsideError> {
        let data = read_lock(&self.data)?;

        Ok(data.values().filter(|t| t.id.matches(input)).cloned().collect())
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), SetAsideError> {
        let mut data = write_lock(&self.data)?;
        let mut by_category = write_lock(&self.by_category)?;

        if let Some(old_cat) = data.get(&txn.id).and_then(|old| old.category_id) {
            if let Some(ids) = by_category.get_mut(&old_cat) {
                ids.retain(|&id| id != txn.id);
            }
        }

        if let Some(cat_id) = txn.category_id {
            by_category.entry(cat_id).or_default().push(txn.id);
        }

        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction, returning it if it existed
    pub fn delete(&self, id: TransactionId) -> Result<Option<Transaction>, SetAsideError> {
        let mut data = write_lock(&self.data)?;
        let mut by_category = write_lock(&self.by_category)?;

        let removed = data.remove(&id);
        if let Some(cat_id) = removed.as_ref().and_then(|t| t.category_id) {
            if let Some(ids) = by_category.get_mut(&cat_id) {
                ids.retain(|&tid| tid != id);
            }
        }
        Ok(removed)
    }

    /// Remove every transaction
    pub fn clear(&self) -> Result<(), SetAsideError> {
        let mut data = write_lock(&self.data)?;
        let mut by_category = write_lock(&self.by_category)?;

        data.clear();
        by_category.clear();
        Ok(())
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, SetAsideError> {
        let data = read_lock(&self.data)?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryKind, Money};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        let repo = TransactionRepository::new(path);
        (temp_dir, repo)
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn spend(cents: i64, day: u32) -> Transaction {
        Transaction::new(EntryKind::Expense, Money::from_cents(cents), date(day))
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        let txn = spend(5000, 15);
        let id = txn.id;

        repo.upsert(txn).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.amount.cents(), 5000);
    }

    #[test]
    fn test_get_all_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(spend(100, 3)).unwrap();
        repo.upsert(spend(200, 20)).unwrap();
        repo.upsert(spend(300, 10)).unwrap();

        let days: Vec<_> = repo.get_all().unwrap().iter().map(|t| t.date).collect();
        assert_eq!(days, vec![date(20), date(10), date(3)]);
    }

    #[test]
    fn test_category_index_follows_updates() {
        let (_temp_dir, repo) = create_test_repo();
        let food = CategoryId::new();
        let home = CategoryId::new();

        let mut txn = spend(100, 5);
        txn.category_id = Some(food);
        let id = txn.id;
        repo.upsert(txn.clone()).unwrap();
        assert_eq!(repo.get_by_category(food).unwrap().len(), 1);

        txn.category_id = Some(home);
        repo.upsert(txn).unwrap();
        assert!(repo.get_by_category(food).unwrap().is_empty());
        assert_eq!(repo.get_by_category(home).unwrap()[0].id, id);

        repo.delete(id).unwrap();
        assert!(repo.get_by_category(home).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let txn = spend(5000, 15);
        let id = txn.id;

        repo.upsert(txn).unwrap();
        repo.save().unwrap();

        let repo2 = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 1);
        assert_eq!(repo2.get(id).unwrap().unwrap().amount.cents(), 5000);
    }

    #[test]
    fn test_delete_returns_removed() {
        let (_temp_dir, repo) = create_test_repo();
        let txn = spend(5000, 15);
        let id = txn.id;

        repo.upsert(txn).unwrap();
        assert!(repo.delete(id).unwrap().is_some());
        assert!(repo.delete(id).unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_date_range_query() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(spend(100, 10)).unwrap();
        repo.upsert(spend(200, 15)).unwrap();
        repo.upsert(spend(300, 20)).unwrap();

        let range = repo.get_by_date_range(date(12), date(18)).unwrap();
        assert_eq!(range.len(), 1);
        assert_eq!(range[0].amount.cents(), 200);
    }

    #[test]
    fn test_find_by_id_prefix() {
        let (_temp_dir, repo) = create_test_repo();
        let txn = spend(100, 1);
        let short = txn.id.to_string();
        repo.upsert(txn).unwrap();

        assert_eq!(repo.find_by_id_prefix(&short).unwrap().len(), 1);
    }
}
