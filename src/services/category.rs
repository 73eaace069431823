//! Category service
//!
//! CRUD for the flat category list. Deleting a category that is still in use
//! is refused unless forced; a forced delete uncategorizes everything that
//! pointed at it.

use std::collections::HashMap;

use crate::audit::EntityType;
use crate::error::{SetAsideError, SetAsideResult};
use crate::models::{Category, CategoryId, EntryKind};
use crate::storage::Storage;

use super::single_match;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// How many records refer to a category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryUsage {
    pub transactions: usize,
    pub future_expenses: usize,
}

impl CategoryUsage {
    pub fn is_used(&self) -> bool {
        self.transactions > 0 || self.future_expenses > 0
    }
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category at the end of its kind's list
    pub fn create(&self, name: &str, kind: EntryKind, icon: Option<&str>) -> SetAsideResult<Category> {
        let name = name.trim();

        if self.storage.categories.get_by_name(name)?.is_some() {
            return Err(SetAsideError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let sort_order = self.storage.categories.next_sort_order(kind)?;
        let category = Category::with_details(name, kind, icon.unwrap_or("").trim(), sort_order);

        category
            .validate()
            .map_err(|e| SetAsideError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        tracing::info!(id = %category.id, name = %category.name, kind = %category.kind, "category created");
        Ok(category)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> SetAsideResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name or ID string
    pub fn find(&self, identifier: &str) -> SetAsideResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        let matches = self.storage.categories.find_by_id_prefix(identifier)?;
        single_match(matches, "category", identifier)
    }

    /// Find a category or fail with a not-found error
    pub fn resolve(&self, identifier: &str) -> SetAsideResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| SetAsideError::category_not_found(identifier))
    }

    /// List categories, optionally only one kind
    pub fn list(&self, kind: Option<EntryKind>) -> SetAsideResult<Vec<Category>> {
        match kind {
            Some(kind) => self.storage.categories.get_by_kind(kind),
            None => self.storage.categories.get_all(),
        }
    }

    /// All categories keyed by ID, for display lookups
    pub fn lookup(&self) -> SetAsideResult<HashMap<CategoryId, Category>> {
        Ok(self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .map(|c| (c.id, c))
            .collect())
    }

    /// Update a category's name and/or icon
    pub fn update(
        &self,
        id: CategoryId,
        name: Option<&str>,
        icon: Option<&str>,
    ) -> SetAsideResult<Category> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| SetAsideError::category_not_found(id.to_string()))?;

        let before = category.clone();

        if let Some(new_name) = name {
            let new_name = new_name.trim();
            if let Some(existing) = self.storage.categories.get_by_name(new_name)? {
                if existing.id != id {
                    return Err(SetAsideError::Duplicate {
                        entity_type: "Category",
                        identifier: new_name.to_string(),
                    });
                }
            }
            category.name = new_name.to_string();
        }

        if let Some(new_icon) = icon {
            category.icon = new_icon.trim().to_string();
        }

        category.updated_at = chrono::Utc::now();
        category
            .validate()
            .map_err(|e| SetAsideError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        let mut changes = Vec::new();
        if before.name != category.name {
            changes.push(format!("name: {} -> {}", before.name, category.name));
        }
        if before.icon != category.icon {
            changes.push(format!("icon: '{}' -> '{}'", before.icon, category.icon));
        }

        if !changes.is_empty() {
            self.storage.log_update(
                EntityType::Category,
                category.id.to_string(),
                Some(category.name.clone()),
                &before,
                &category,
                Some(changes.join(", ")),
            )?;
        }

        Ok(category)
    }

    /// Count the records that refer to a category
    pub fn usage(&self, id: CategoryId) -> SetAsideResult<CategoryUsage> {
        Ok(CategoryUsage {
            transactions: self.storage.transactions.get_by_category(id)?.len(),
            future_expenses: self.storage.future_expenses.get_by_category(id)?.len(),
        })
    }

    /// Delete a category
    ///
    /// Refused while transactions or future expenses use it, unless `force`
    /// is set, in which case those records lose their category.
    pub fn delete(&self, id: CategoryId, force: bool) -> SetAsideResult<Category> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| SetAsideError::category_not_found(id.to_string()))?;

        let usage = self.usage(id)?;
        if usage.is_used() && !force {
            tracing::warn!(id = %id, ?usage, "refused to delete category in use");
            return Err(SetAsideError::Validation(format!(
                "Cannot delete category '{}': used by {} transactions and {} future expenses. Use --force to uncategorize them.",
                category.name, usage.transactions, usage.future_expenses
            )));
        }

        if usage.transactions > 0 {
            for mut txn in self.storage.transactions.get_by_category(id)? {
                txn.category_id = None;
                txn.updated_at = chrono::Utc::now();
                self.storage.transactions.upsert(txn)?;
            }
            self.storage.transactions.save()?;
        }

        if usage.future_expenses > 0 {
            for mut expense in self.storage.future_expenses.get_by_category(id)? {
                expense.category_id = None;
                expense.updated_at = chrono::Utc::now();
                self.storage.future_expenses.upsert(expense)?;
            }
            self.storage.future_expenses.save()?;
        }

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        self.storage.log_delete(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        tracing::info!(id = %id, name = %category.name, ?usage, "category deleted");
        Ok(category)
    }
}
