//! Category model
//!
//! Categories are a flat list, each tagged as an expense or an income
//! category. Transactions and future expenses refer to them by ID.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::CategoryId;

/// Maximum length of a category name
pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// Whether money flows out of or into the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    Expense,
    Income,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "expense"),
            Self::Income => write!(f, "income"),
        }
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" | "out" => Ok(Self::Expense),
            "income" | "in" => Ok(Self::Income),
            other => Err(format!(
                "Unknown kind '{}': expected 'expense' or 'income'",
                other
            )),
        }
    }
}

/// A spending or income category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    pub name: String,

    #[serde(default)]
    pub kind: EntryKind,

    /// Short label shown next to the name (may be empty)
    #[serde(default)]
    pub icon: String,

    /// Sort order within its kind
    pub sort_order: i32,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            kind,
            icon: String::new(),
            sort_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new category with an icon and a specific sort order
    pub fn with_details(
        name: impl Into<String>,
        kind: EntryKind,
        icon: impl Into<String>,
        sort_order: i32,
    ) -> Self {
        let mut category = Self::new(name, kind);
        category.icon = icon.into();
        category.sort_order = sort_order;
        category
    }

    /// Name with icon prefix, for lists
    pub fn label(&self) -> String {
        if self.icon.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.icon, self.name)
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        let len = self.name.chars().count();
        if len > MAX_CATEGORY_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(len));
        }

        if self.icon.chars().count() > 4 {
            return Err(CategoryValidationError::IconTooLong);
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Categories created for a fresh store: (name, kind, icon)
pub const DEFAULT_CATEGORIES: &[(&str, EntryKind, &str)] = &[
    ("Food", EntryKind::Expense, "🍽"),
    ("Transport", EntryKind::Expense, "🚗"),
    ("Home", EntryKind::Expense, "🏠"),
    ("Bills", EntryKind::Expense, "🧾"),
    ("Health", EntryKind::Expense, "💊"),
    ("Entertainment", EntryKind::Expense, "🎬"),
    ("Shopping", EntryKind::Expense, "🛍"),
    ("Other", EntryKind::Expense, "📦"),
    ("Salary", EntryKind::Income, "💼"),
    ("Other Income", EntryKind::Income, "💰"),
];

/// Build the default category list
pub fn default_categories() -> Vec<Category> {
    let mut expense_order = 0;
    let mut income_order = 0;

    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, kind, icon)| {
            let order = match kind {
                EntryKind::Expense => &mut expense_order,
                EntryKind::Income => &mut income_order,
            };
            let category = Category::with_details(*name, *kind, *icon, *order);
            *order += 1;
            category
        })
        .collect()
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    IconTooLong,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Category name too long ({} chars, max {})",
                len, MAX_CATEGORY_NAME_LEN
            ),
            Self::IconTooLong => write!(f, "Category icon must be at most 4 characters"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Groceries", EntryKind::Expense);
        assert_eq!(category.name, "Groceries");
        assert_eq!(category.kind, EntryKind::Expense);
        assert!(category.icon.is_empty());
        assert_eq!(category.label(), "Groceries");
    }

    #[test]
    fn test_label_with_icon() {
        let category = Category::with_details("Salary", EntryKind::Income, "💼", 0);
        assert_eq!(category.label(), "💼 Salary");
    }

    #[test]
    fn test_validation() {
        let mut category = Category::new("", EntryKind::Expense);
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "x".repeat(51);
        assert_eq!(category.validate(), Err(CategoryValidationError::NameTooLong(51)));

        category.name = "Books".into();
        category.icon = "abcde".into();
        assert_eq!(category.validate(), Err(CategoryValidationError::IconTooLong));

        category.icon = "📚".into();
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_default_categories_sort_order_per_kind() {
        let categories = default_categories();
        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());

        let income: Vec<_> = categories
            .iter()
            .filter(|c| c.kind == EntryKind::Income)
            .collect();
        assert_eq!(income.len(), 2);
        assert_eq!(income[0].sort_order, 0);
        assert_eq!(income[1].sort_order, 1);

        let other = categories.iter().find(|c| c.name == "Other").unwrap();
        assert_eq!(other.sort_order, 7);
    }

    #[test]
    fn test_entry_kind_parse() {
        assert_eq!("Income".parse::<EntryKind>().unwrap(), EntryKind::Income);
        assert_eq!("out".parse::<EntryKind>().unwrap(), EntryKind::Expense);
        assert!("transfer".parse::<EntryKind>().is_err());
    }
}
