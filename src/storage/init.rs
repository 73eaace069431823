//! Storage initialization
//!
//! First-run setup: directories and the default category list.

use crate::config::paths::SetAsidePaths;
use crate::error::SetAsideError;
use crate::models::category::default_categories;

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing data is left untouched.
pub fn initialize_storage(paths: &SetAsidePaths) -> Result<(), SetAsideError> {
    paths.ensure_directories()?;

    if !paths.categories_file().exists() {
        create_default_categories(paths)?;
    }

    Ok(())
}

/// Write the default expense and income categories
pub fn create_default_categories(paths: &SetAsidePaths) -> Result<(), SetAsideError> {
    let data = CategoryData {
        categories: default_categories(),
    };
    write_json_atomic(paths.categories_file(), &data)?;

    tracing::info!(count = data.categories.len(), "created default categories");
    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &SetAsidePaths) -> bool {
    !paths.categories_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, EntryKind};
    use tempfile::TempDir;

    fn read_categories(paths: &SetAsidePaths) -> CategoryData {
        let content = std::fs::read_to_string(paths.categories_file()).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SetAsidePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        initialize_storage(&paths).unwrap();

        assert!(!needs_initialization(&paths));
        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_default_categories_created() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SetAsidePaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let data = read_categories(&paths);
        let names: Vec<_> = data.categories.iter().map(|c| c.name.as_str()).collect();
        assert!(names.contains(&"Food"));
        assert!(names.contains(&"Transport"));
        assert!(names.contains(&"Salary"));
        assert_eq!(
            data.categories
                .iter()
                .filter(|c| c.kind == EntryKind::Income)
                .count(),
            2
        );
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SetAsidePaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let custom = CategoryData {
            categories: vec![Category::new("Only", EntryKind::Expense)],
        };
        write_json_atomic(paths.categories_file(), &custom).unwrap();

        initialize_storage(&paths).unwrap();

        let data = read_categories(&paths);
        assert_eq!(data.categories.len(), 1);
        assert_eq!(data.categories[0].name, "Only");
    }
}
