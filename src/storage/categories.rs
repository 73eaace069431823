//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SetAsideError;
use crate::models::{Category, CategoryId, EntryKind};

use super::file_io::{read_json, read_lock, write_json_atomic, write_lock};

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CategoryData {
    pub categories: Vec<Category>,
}

fn sort_categories(list: &mut [Category]) {
    list.sort_by(|a, b| {
        a.kind
            .cmp(&b.kind)
            .then(a.sort_order.cmp(&b.sort_order))
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), SetAsideError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut categories = write_lock(&self.categories)?;

        categories.clear();
        for category in file_data.categories {
            categories.insert(category.id, category);
        }

        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), SetAsideError> {
        let categories = read_lock(&self.categories)?;

        let mut list: Vec<_> = categories.values().cloned().collect();
        sort_categories(&mut list);

        write_json_atomic(&self.path, &CategoryData { categories: list })
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, SetAsideError> {
        let categories = read_lock(&self.categories)?;

        Ok(categories.get(&id).cloned())
    }

    /// Get all categories: expense first, then income, each by sort order
    pub fn get_all(&self) -> Result<Vec<Category>, SetAsideError> {
        let categories = read_lock(&self.categories)?;

        let mut list: Vec<_> = categories.values().cloned().collect();
        sort_categories(&mut list);
        Ok(list)
    }

    /// Get the categories of one kind
    pub fn get_by_kind(&self, kind: EntryKind) -> Result<Vec<Category>, SetAsideError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|c| c.kind == kind)
            .collect())
    }

    /// Get a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, SetAsideError> {
        let categories = read_lock(&self.categories)?;

        let name_lower = name.trim().to_lowercase();
        Ok(categories
            .values()
            .find(|c| c.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Categories whose ID matches a full ID, display ID or prefix
    pub fn find_by_id_prefix(&self, input: &str) -> Result<Vec<Category>, SetAsideError> {
        let categories = read_lock(&self.categories)?;

        Ok(categories
            .values()
            .filter(|c| c.id.matches(input))
            .cloned()
            .collect())
    }

    /// Next free sort order for a kind
    pub fn next_sort_order(&self, kind: EntryKind) -> Result<i32, SetAsideError> {
        Ok(self
            .get_by_kind(kind)?
            .iter()
            .map(|c| c.sort_order + 1)
            .max()
            .unwrap_or(0))
    }

    /// Insert or update a category
    pub fn upsert(&self, category: Category) -> Result<(), SetAsideError> {
        let mut categories = write_lock(&self.categories)?;

        categories.insert(category.id, category);
        Ok(())
    }

    /// Delete a category, returning it if it existed
    pub fn delete(&self, id: CategoryId) -> Result<Option<Category>, SetAsideError> {
        let mut categories = write_lock(&self.categories)?;

        Ok(categories.remove(&id))
    }

    /// Replace every category
    pub fn replace_all(&self, list: Vec<Category>) -> Result<(), SetAsideError> {
        let mut categories = write_lock(&self.categories)?;

        categories.clear();
        for category in list {
            categories.insert(category.id, category);
        }
        Ok(())
    }

    /// Count categories
    pub fn count(&self) -> Result<usize, SetAsideError> {
        let categories = read_lock(&self.categories)?;

        Ok(categories.len())
    }
}
