//! Budget profile repository
//!
//! The profile is a single record, stored in profile.json.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SetAsideError;
use crate::models::BudgetProfile;

use super::file_io::{read_json, read_lock, write_json_atomic, write_lock};

/// Repository for the budget profile
pub struct ProfileRepository {
    path: PathBuf,
    profile: RwLock<BudgetProfile>,
}

impl ProfileRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            profile: RwLock::new(BudgetProfile::default()),
        }
    }

    /// Load the profile from disk
    pub fn load(&self) -> Result<(), SetAsideError> {
        let loaded: BudgetProfile = read_json(&self.path)?;

        let mut profile = write_lock(&self.profile)?;
        *profile = loaded;

        Ok(())
    }

    /// Save the profile to disk
    pub fn save(&self) -> Result<(), SetAsideError> {
        let profile = read_lock(&self.profile)?;

        write_json_atomic(&self.path, &*profile)
    }

    /// Get a copy of the profile
    pub fn get(&self) -> Result<BudgetProfile, SetAsideError> {
        let profile = read_lock(&self.profile)?;

        Ok(profile.clone())
    }

    /// Replace the profile
    pub fn set(&self, updated: BudgetProfile) -> Result<(), SetAsideError> {
        let mut profile = write_lock(&self.profile)?;

        *profile = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FixedExpense, Money};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_profile() {
        let temp_dir = TempDir::new().unwrap();
        let repo = ProfileRepository::new(temp_dir.path().join("profile.json"));
        repo.load().unwrap();

        let profile = repo.get().unwrap();
        assert!(profile.monthly_income.is_zero());
        assert!(!profile.is_complete());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("profile.json");
        let repo = ProfileRepository::new(path.clone());

        let mut profile = repo.get().unwrap();
        profile.monthly_income = Money::from_cents(250000);
        profile.income_set = true;
        profile
            .fixed_expenses
            .push(FixedExpense::new("Rent", Money::from_cents(90000)));
        repo.set(profile).unwrap();
        repo.save().unwrap();

        let repo2 = ProfileRepository::new(path);
        repo2.load().unwrap();
        let loaded = repo2.get().unwrap();
        assert_eq!(loaded.monthly_income.cents(), 250000);
        assert_eq!(loaded.fixed_expenses.len(), 1);
        assert!(loaded.income_set);
    }
}
