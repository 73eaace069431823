//! Future expense repository for JSON storage
//!
//! Manages loading and saving planned expenses to future_expenses.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SetAsideError;
use crate::models::{CategoryId, FutureExpense, FutureExpenseId};

use super::file_io::{read_json, read_lock, write_json_atomic, write_lock};

/// Serializable future expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct FutureExpenseData {
    pub future_expenses: Vec<FutureExpense>,
}

/// Soonest due first, then by name
fn by_due_date(a: &FutureExpense, b: &FutureExpense) -> std::cmp::Ordering {
    a.due_date
        .cmp(&b.due_date)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}

/// Repository for future expense persistence
pub struct FutureExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<FutureExpenseId, FutureExpense>>,
}

impl FutureExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load future expenses from disk
    pub fn load(&self) -> Result<(), SetAsideError> {
        let file_data: FutureExpenseData = read_json(&self.path)?;

        let mut data = write_lock(&self.data)?;

        data.clear();
        for expense in file_data.future_expenses {
            data.insert(expense.id, expense);
        }

        Ok(())
    }

    /// Save future expenses to disk
    pub fn save(&self) -> Result<(), SetAsideError> {
        let future_expenses = self.get_all()?;
        write_json_atomic(&self.path, &FutureExpenseData { future_expenses })
    }

    pub fn get(&self, id: FutureExpenseId) -> Result<Option<FutureExpense>, SetAsideError> {
        let data = read_lock(&self.data)?;

        Ok(data.get(&id).cloned())
    }

    /// Get all future expenses, soonest due first
    pub fn get_all(&self) -> Result<Vec<FutureExpense>, SetAsideError> {
        let data = read_lock(&self.data)?;

        let mut list: Vec<_> = data.values().cloned().collect();
        list.sort_by(by_due_date);
        Ok(list)
    }

    /// Future expenses with this name (case-insensitive), soonest due first
    ///
    /// Names are not unique, so this can return several records.
    pub fn find_by_name(&self, name: &str) -> Result<Vec<FutureExpense>, SetAsideError> {
        let data = read_lock(&self.data)?;

        let name_lower = name.trim().to_lowercase();
        let mut list: Vec<_> = data
            .values()
            .filter(|e| e.name.to_lowercase() == name_lower)
            .cloned()
            .collect();
        list.sort_by(by_due_date);
        Ok(list)
    }

    /// Future expenses whose ID matches a full ID, display ID or prefix
    pub fn find_by_id_prefix(&self, input: &str) -> Result<Vec<FutureExpense>, SetAsideError> {
        let data = read_lock(&self.data)?;

        Ok(data.values().filter(|e| e.id.matches(input)).cloned().collect())
    }

    /// Future expenses filed under a category
    pub fn get_by_category(&self, category_id: CategoryId) -> Result<Vec<FutureExpense>, SetAsideError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|e| e.category_id == Some(category_id))
            .collect())
    }

    /// Insert or update a future expense
    pub fn upsert(&self, expense: FutureExpense) -> Result<(), SetAsideError> {
        let mut data = write_lock(&self.data)?;

        data.insert(expense.id, expense);
        Ok(())
    }

    /// Delete a future expense, returning it if it existed
    pub fn delete(&self, id: FutureExpenseId) -> Result<Option<FutureExpense>, SetAsideError> {
        let mut data = write_lock(&self.data)?;

        Ok(data.remove(&id))
    }

    /// Remove every future expense
    pub fn clear(&self) -> Result<(), SetAsideError> {
        let mut data = write_lock(&self.data)?;

        data.clear();
        Ok(())
    }

    pub fn count(&self) -> Result<usize, SetAsideError> {
        let data = read_lock(&self.data)?;

        Ok(data.len())
    }
}
