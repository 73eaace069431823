//! Budget profile service
//!
//! The three setup steps: monthly income, fixed monthly expenses and the
//! savings goal. Once all three are entered, `setup_completed` is recorded in
//! the settings file.

use chrono::Utc;

use crate::audit::EntityType;
use crate::config::settings::Settings;
use crate::error::{SetAsideError, SetAsideResult};
use crate::models::{BudgetProfile, FixedExpense, Money};
use crate::storage::Storage;

/// Service for the budget profile
pub struct ProfileService<'a> {
    storage: &'a Storage,
}

impl<'a> ProfileService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The current profile
    pub fn show(&self) -> SetAsideResult<BudgetProfile> {
        self.storage.profile.get()
    }

    /// Set the expected monthly income
    pub fn set_income(&self, amount: Money) -> SetAsideResult<BudgetProfile> {
        self.modify(|profile| {
            profile.monthly_income = amount;
            profile.income_set = true;
            format!("income: {}", amount)
        })
    }

    /// Set the monthly savings goal
    pub fn set_savings(&self, amount: Money) -> SetAsideResult<BudgetProfile> {
        self.modify(|profile| {
            profile.monthly_savings = amount;
            profile.savings_set = true;
            format!("savings: {}", amount)
        })
    }

    /// Add a recurring monthly expense
    pub fn add_fixed_expense(&self, name: &str, amount: Money) -> SetAsideResult<FixedExpense> {
        let name = name.trim();
        if self
            .show()?
            .fixed_expenses
            .iter()
            .any(|e| e.name.eq_ignore_ascii_case(name))
        {
            return Err(SetAsideError::Duplicate {
                entity_type: "Fixed expense",
                identifier: name.to_string(),
            });
        }

        let expense = FixedExpense::new(name, amount);
        let added = expense.clone();
        self.modify(move |profile| {
            let summary = format!("added fixed expense {} ({})", expense.name, expense.amount);
            profile.fixed_expenses.push(expense);
            summary
        })?;

        self.storage.log_create(
            EntityType::FixedExpense,
            added.id.to_string(),
            Some(added.name.clone()),
            &added,
        )?;

        Ok(added)
    }

    /// Remove a fixed expense by name or ID string
    pub fn remove_fixed_expense(&self, identifier: &str) -> SetAsideResult<FixedExpense> {
        let profile = self.show()?;
        let needle = identifier.trim();

        let position = profile
            .fixed_expenses
            .iter()
            .position(|e| e.name.eq_ignore_ascii_case(needle))
            .or_else(|| {
                profile
                    .fixed_expenses
                    .iter()
                    .position(|e| e.id.matches(needle))
            })
            .ok_or_else(|| SetAsideError::fixed_expense_not_found(needle))?;

        let removed = profile.fixed_expenses[position].clone();
        self.modify(move |profile| {
            profile.fixed_expenses.remove(position);
            "removed fixed expense".to_string()
        })?;

        self.storage.log_delete(
            EntityType::FixedExpense,
            removed.id.to_string(),
            Some(removed.name.clone()),
            &removed,
        )?;

        Ok(removed)
    }

    /// Apply a change, validate, persist and audit it
    fn modify<F>(&self, change: F) -> SetAsideResult<BudgetProfile>
    where
        F: FnOnce(&mut BudgetProfile) -> String,
    {
        let before = self.storage.profile.get()?;
        let mut profile = before.clone();

        let summary = change(&mut profile);
        profile.updated_at = Some(Utc::now());

        profile
            .validate()
            .map_err(|e| SetAsideError::Validation(e.to_string()))?;

        self.storage.profile.set(profile.clone())?;
        self.storage.profile.save()?;

        self.storage.log_update(
            EntityType::Profile,
            "profile",
            None,
            &before,
            &profile,
            Some(summary),
        )?;

        self.mark_setup_if_complete(&profile)?;

        tracing::info!(
            disposable = %profile.disposable_monthly(),
            complete = profile.is_complete(),
            "budget profile updated"
        );
        Ok(profile)
    }

    fn mark_setup_if_complete(&self, profile: &BudgetProfile) -> SetAsideResult<()> {
        let paths = self.storage.paths();
        let mut settings = Settings::load_or_create(paths)?;
        if settings.setup_completed != profile.is_complete() {
            settings.setup_completed = profile.is_complete();
            settings.save(paths)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SetAsidePaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SetAsidePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_setup_steps_complete_setup() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProfileService::new(&storage);

        service.set_income(Money::from_cents(200000)).unwrap();
        service
            .add_fixed_expense("Rent", Money::from_cents(70000))
            .unwrap();
        assert!(!Settings::load_or_create(storage.paths()).unwrap().setup_completed);

        let profile = service.set_savings(Money::from_cents(20000)).unwrap();
        assert!(profile.is_complete());
        assert_eq!(profile.disposable_monthly().cents(), 110000);
        assert!(Settings::load_or_create(storage.paths()).unwrap().setup_completed);
    }

    #[test]
    fn test_negative_income_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProfileService::new(&storage);

        let err = service.set_income(Money::from_cents(-1)).unwrap_err();
        assert!(err.is_validation());
        assert!(service.show().unwrap().monthly_income.is_zero());
    }

    #[test]
    fn test_fixed_expense_rules() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProfileService::new(&storage);

        assert!(service
            .add_fixed_expense("Gym", Money::zero())
            .unwrap_err()
            .is_validation());

        service
            .add_fixed_expense("Phone", Money::from_cents(1500))
            .unwrap();
        assert!(matches!(
            service.add_fixed_expense("phone", Money::from_cents(1)),
            Err(SetAsideError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_remove_fixed_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProfileService::new(&storage);

        let netflix = service
            .add_fixed_expense("Streaming", Money::from_cents(1299))
            .unwrap();
        service
            .add_fixed_expense("Phone", Money::from_cents(1500))
            .unwrap();

        service.remove_fixed_expense("phone").unwrap();
        service.remove_fixed_expense(&netflix.id.to_string()).unwrap();
        assert!(service.show().unwrap().fixed_expenses.is_empty());
        assert!(service.remove_fixed_expense("Phone").unwrap_err().is_not_found());
    }
}
