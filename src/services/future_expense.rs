//! Future expense service
//!
//! CRUD for planned expenses and the set-aside figures derived from them.

use chrono::{NaiveDate, Utc};

use crate::audit::EntityType;
use crate::error::{SetAsideError, SetAsideResult};
use crate::models::future_expense::{total_amount, total_daily_amount};
use crate::models::{CategoryId, FutureExpense, FutureExpenseFields, FutureExpenseId, Money};
use crate::storage::Storage;

use super::single_match;

/// Service for future expense management
pub struct FutureExpenseService<'a> {
    storage: &'a Storage,
}

/// Aggregate figures over all planned expenses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FutureExpenseSummary {
    pub count: usize,
    /// Sum of the full amounts still to pay
    pub total_amount: Money,
    /// Sum of the per-expense daily set-aside amounts
    pub total_daily: Money,
}

impl<'a> FutureExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn check_category(&self, category_id: Option<CategoryId>) -> SetAsideResult<()> {
        if let Some(cat_id) = category_id {
            self.storage
                .categories
                .get(cat_id)?
                .ok_or_else(|| SetAsideError::category_not_found(cat_id.to_string()))?;
        }
        Ok(())
    }

    /// Plan a new expense from validated form fields
    pub fn create(&self, fields: FutureExpenseFields) -> SetAsideResult<FutureExpense> {
        self.check_category(fields.category_id)?;

        let mut expense = FutureExpense::new(fields.name, fields.amount, fields.due_date);
        expense.category_id = fields.category_id;
        expense.description = fields.description;

        expense
            .validate()
            .map_err(|e| SetAsideError::Validation(e.to_string()))?;

        self.storage.future_expenses.upsert(expense.clone())?;
        self.storage.future_expenses.save()?;

        self.storage.log_create(
            EntityType::FutureExpense,
            expense.id.to_string(),
            Some(expense.name.clone()),
            &expense,
        )?;

        tracing::info!(
            id = %expense.id,
            name = %expense.name,
            amount = %expense.amount,
            due = %expense.due_date,
            "future expense planned"
        );
        Ok(expense)
    }

    pub fn get(&self, id: FutureExpenseId) -> SetAsideResult<Option<FutureExpense>> {
        self.storage.future_expenses.get(id)
    }

    /// Find a future expense by name or ID string
    ///
    /// A name shared by several expenses is an error; the caller has to use
    /// the ID instead.
    pub fn find(&self, identifier: &str) -> SetAsideResult<Option<FutureExpense>> {
        let mut named = self.storage.future_expenses.find_by_name(identifier)?;
        match named.len() {
            0 => {}
            1 => return Ok(named.pop()),
            n => {
                return Err(SetAsideError::Validation(format!(
                    "'{}' matches {} future expenses; use the ID from 'setaside future list'",
                    identifier.trim(),
                    n
                )))
            }
        }

        let matches = self.storage.future_expenses.find_by_id_prefix(identifier)?;
        single_match(matches, "future expense", identifier)
    }

    /// Find a future expense or fail with a not-found error
    pub fn resolve(&self, identifier: &str) -> SetAsideResult<FutureExpense> {
        self.find(identifier)?
            .ok_or_else(|| SetAsideError::future_expense_not_found(identifier))
    }

    /// All planned expenses, soonest due first
    pub fn list(&self) -> SetAsideResult<Vec<FutureExpense>> {
        self.storage.future_expenses.get_all()
    }

    /// The next `count` expenses that are not yet due
    pub fn upcoming(&self, today: NaiveDate, count: usize) -> SetAsideResult<Vec<FutureExpense>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|e| e.due_date > today)
            .take(count)
            .collect())
    }

    /// Replace an expense's fields with validated form values
    pub fn update(
        &self,
        id: FutureExpenseId,
        fields: FutureExpenseFields,
    ) -> SetAsideResult<FutureExpense> {
        let mut expense = self
            .storage
            .future_expenses
            .get(id)?
            .ok_or_else(|| SetAsideError::future_expense_not_found(id.to_string()))?;

        self.check_category(fields.category_id)?;

        let before = expense.clone();

        expense.name = fields.name;
        expense.amount = fields.amount;
        expense.due_date = fields.due_date;
        expense.category_id = fields.category_id;
        expense.description = fields.description;
        expense.updated_at = Utc::now();

        expense
            .validate()
            .map_err(|e| SetAsideError::Validation(e.to_string()))?;

        self.storage.future_expenses.upsert(expense.clone())?;
        self.storage.future_expenses.save()?;

        let mut changes = Vec::new();
        if before.name != expense.name {
            changes.push(format!("name: {} -> {}", before.name, expense.name));
        }
        if before.amount != expense.amount {
            changes.push(format!("amount: {} -> {}", before.amount, expense.amount));
        }
        if before.due_date != expense.due_date {
            changes.push(format!("due: {} -> {}", before.due_date, expense.due_date));
        }
        if before.category_id != expense.category_id {
            changes.push("category changed".to_string());
        }
        if before.description != expense.description {
            changes.push("description changed".to_string());
        }

        let diff = if changes.is_empty() {
            None
        } else {
            Some(changes.join(", "))
        };

        self.storage.log_update(
            EntityType::FutureExpense,
            expense.id.to_string(),
            Some(expense.name.clone()),
            &before,
            &expense,
            diff,
        )?;

        tracing::info!(id = %expense.id, "future expense updated");
        Ok(expense)
    }

    /// Delete a planned expense
    pub fn delete(&self, id: FutureExpenseId) -> SetAsideResult<FutureExpense> {
        let expense = self
            .storage
            .future_expenses
            .delete(id)?
            .ok_or_else(|| SetAsideError::future_expense_not_found(id.to_string()))?;

        self.storage.future_expenses.save()?;

        self.storage.log_delete(
            EntityType::FutureExpense,
            expense.id.to_string(),
            Some(expense.name.clone()),
            &expense,
        )?;

        tracing::info!(id = %id, name = %expense.name, "future expense deleted");
        Ok(expense)
    }

    /// Count, total to pay and total daily set-aside as of `today`
    pub fn summary(&self, today: NaiveDate) -> SetAsideResult<FutureExpenseSummary> {
        let expenses = self.list()?;
        Ok(FutureExpenseSummary {
            count: expenses.len(),
            total_amount: total_amount(&expenses),
            total_daily: total_daily_amount(&expenses, today),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SetAsidePaths;
    use crate::models::FutureExpenseDraft;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SetAsidePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(name: &str, amount: &str, due: &str) -> FutureExpenseFields {
        FutureExpenseDraft {
            name: name.into(),
            amount: amount.into(),
            due_date: due.into(),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_create_and_find_by_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = FutureExpenseService::new(&storage);

        let created = service.create(draft("Car insurance", "480", "2025-06-30")).unwrap();
        assert_eq!(created.amount.cents(), 48000);

        let found = service.find("car insurance").unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(service.resolve("bike").unwrap_err().is_not_found());
    }

    #[test]
    fn test_shared_name_is_ambiguous() {
        let (_temp_dir, storage) = create_test_storage();
        let service = FutureExpenseService::new(&storage);

        let first = service.create(draft("Rent", "700", "2025-04-01")).unwrap();
        let second = service.create(draft("Rent", "750", "2025-05-01")).unwrap();

        for _ in 0..5 {
            assert!(service.find("rent").unwrap_err().is_validation());
        }
        assert!(service.resolve("Rent").unwrap_err().is_validation());

        let by_id = service.resolve(&first.id.as_uuid().to_string()).unwrap();
        assert_eq!(by_id.amount.cents(), 70000);
        assert_eq!(service.resolve(&second.id.as_uuid().to_string()).unwrap().id, second.id);

        service.delete(first.id).unwrap();
        assert_eq!(service.resolve("rent").unwrap().id, second.id);
    }

    #[test]
    fn test_summary() {
        let (_temp_dir, storage) = create_test_storage();
        let service = FutureExpenseService::new(&storage);
        let today = date(2025, 3, 10);

        // 100.00 over 3 days -> 33.33, 300.00 over 30 days -> 10.00, past -> 0
        service.create(draft("A", "100", "2025-03-13")).unwrap();
        service.create(draft("B", "300", "2025-04-09")).unwrap();
        service.create(draft("C", "50", "2025-03-01")).unwrap();

        let summary = service.summary(today).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.total_amount.cents(), 45000);
        assert_eq!(summary.total_daily.cents(), 4333);
    }

    #[test]
    fn test_empty_summary() {
        let (_temp_dir, storage) = create_test_storage();
        let service = FutureExpenseService::new(&storage);

        let summary = service.summary(date(2025, 1, 1)).unwrap();
        assert_eq!(summary.count, 0);
        assert!(summary.total_daily.is_zero());
    }

    #[test]
    fn test_upcoming_skips_due_and_limits() {
        let (_temp_dir, storage) = create_test_storage();
        let service = FutureExpenseService::new(&storage);
        let today = date(2025, 3, 10);

        service.create(draft("Past", "10", "2025-03-01")).unwrap();
        service.create(draft("Today", "10", "2025-03-10")).unwrap();
        service.create(draft("Soon", "10", "2025-03-12")).unwrap();
        service.create(draft("Later", "10", "2025-05-01")).unwrap();
        service.create(draft("Much later", "10", "2025-09-01")).unwrap();
        service.create(draft("Next year", "10", "2026-01-01")).unwrap();

        let names: Vec<_> = service
            .upcoming(today, 3)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Soon", "Later", "Much later"]);
    }

    #[test]
    fn test_update_and_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = FutureExpenseService::new(&storage);

        let created = service.create(draft("Books", "120", "2025-09-01")).unwrap();
        let updated = service
            .update(created.id, draft("School books", "150", "2025-09-05"))
            .unwrap();
        assert_eq!(updated.name, "School books");
        assert_eq!(updated.amount.cents(), 15000);

        let entries = storage.audit().read_all().unwrap();
        let diff = entries[1].diff_summary.clone().unwrap();
        assert!(diff.contains("amount: 120.00 -> 150.00"));

        service.delete(created.id).unwrap();
        assert!(service.list().unwrap().is_empty());
        assert!(service.delete(created.id).unwrap_err().is_not_found());
    }
}
