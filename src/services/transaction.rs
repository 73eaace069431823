//! Transaction service
//!
//! Provides business logic for the transaction history: CRUD with
//! validation, filtered listing and the per-day and per-month totals the
//! dashboard and statistics are built from.

use chrono::{Datelike, NaiveDate, Utc};

use crate::audit::EntityType;
use crate::error::{SetAsideError, SetAsideResult};
use crate::models::{CategoryId, EntryKind, Money, Transaction, TransactionFields, TransactionId};
use crate::storage::Storage;

use super::single_match;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Calendar month as (year, month)
    pub month: Option<(i32, u32)>,
    pub category_id: Option<CategoryId>,
    pub kind: Option<EntryKind>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Only transactions dated in the given month
    pub fn month(mut self, year: i32, month: u32) -> Self {
        self.month = Some((year, month));
        self
    }

    /// Filter by category
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Only expenses or only income
    pub fn kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
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

    /// Record a new transaction from validated form fields
    pub fn create(&self, fields: TransactionFields) -> SetAsideResult<Transaction> {
        self.check_category(fields.category_id)?;

        let txn = Transaction::with_details(
            fields.kind,
            fields.amount,
            fields.date,
            fields.category_id,
            fields.description,
        );

        txn.validate()
            .map_err(|e| SetAsideError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(describe(&txn)),
            &txn,
        )?;

        tracing::info!(id = %txn.id, kind = %txn.kind, amount = %txn.amount, "transaction recorded");
        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> SetAsideResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by ID string (full, display form or prefix)
    pub fn find(&self, identifier: &str) -> SetAsideResult<Option<Transaction>> {
        let matches = self.storage.transactions.find_by_id_prefix(identifier)?;
        single_match(matches, "transaction", identifier)
    }

    /// Find a transaction or fail with a not-found error
    pub fn resolve(&self, identifier: &str) -> SetAsideResult<Transaction> {
        self.find(identifier)?
            .ok_or_else(|| SetAsideError::transaction_not_found(identifier))
    }

    /// List transactions, newest first
    pub fn list(&self, filter: TransactionFilter) -> SetAsideResult<Vec<Transaction>> {
        let mut transactions = if let Some(category_id) = filter.category_id {
            self.storage.transactions.get_by_category(category_id)?
        } else if let Some((year, month)) = filter.month {
            let (start, end) = month_bounds(year, month)?;
            self.storage.transactions.get_by_date_range(start, end)?
        } else {
            self.storage.transactions.get_all()?
        };

        if let Some((year, month)) = filter.month {
            transactions.retain(|t| t.in_month(year, month));
        }
        if let Some(kind) = filter.kind {
            transactions.retain(|t| t.kind == kind);
        }

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// Replace a transaction's fields with validated form values
    pub fn update(&self, id: TransactionId, fields: TransactionFields) -> SetAsideResult<Transaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| SetAsideError::transaction_not_found(id.to_string()))?;

        self.check_category(fields.category_id)?;

        let before = txn.clone();

        txn.kind = fields.kind;
        txn.amount = fields.amount;
        txn.date = fields.date;
        txn.category_id = fields.category_id;
        txn.description = fields.description;
        txn.updated_at = Utc::now();

        txn.validate()
            .map_err(|e| SetAsideError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        let mut changes = Vec::new();
        if before.kind != txn.kind {
            changes.push(format!("kind: {} -> {}", before.kind, txn.kind));
        }
        if before.date != txn.date {
            changes.push(format!("date: {} -> {}", before.date, txn.date));
        }
        if before.amount != txn.amount {
            changes.push(format!("amount: {} -> {}", before.amount, txn.amount));
        }
        if before.category_id != txn.category_id {
            changes.push("category changed".to_string());
        }
        if before.description != txn.description {
            changes.push("description changed".to_string());
        }

        let diff = if changes.is_empty() {
            None
        } else {
            Some(changes.join(", "))
        };

        self.storage.log_update(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(describe(&txn)),
            &before,
            &txn,
            diff,
        )?;

        Ok(txn)
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> SetAsideResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .delete(id)?
            .ok_or_else(|| SetAsideError::transaction_not_found(id.to_string()))?;

        self.storage.transactions.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            id.to_string(),
            Some(describe(&txn)),
            &txn,
        )?;

        tracing::info!(id = %id, "transaction deleted");
        Ok(txn)
    }

    /// Total of one kind of transaction on a single day
    pub fn total_on(&self, date: NaiveDate, kind: EntryKind) -> SetAsideResult<Money> {
        Ok(self
            .storage
            .transactions
            .get_by_date_range(date, date)?
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum())
    }

    /// Total of one kind of transaction in a calendar month
    pub fn total_in_month(&self, year: i32, month: u32, kind: EntryKind) -> SetAsideResult<Money> {
        Ok(self
            .list(TransactionFilter::new().month(year, month).kind(kind))?
            .iter()
            .map(|t| t.amount)
            .sum())
    }

    /// Count transactions
    pub fn count(&self) -> SetAsideResult<usize> {
        self.storage.transactions.count()
    }
}

/// Short label used in audit entries
fn describe(txn: &Transaction) -> String {
    if txn.description.is_empty() {
        format!("{} {}", txn.date, txn.kind)
    } else {
        format!("{} {}", txn.date, txn.description)
    }
}

/// First and last day of a calendar month
pub fn month_bounds(year: i32, month: u32) -> SetAsideResult<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| SetAsideError::Validation(format!("Invalid month {}-{:02}", year, month)))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| SetAsideError::Validation(format!("Invalid month {}-{:02}", year, month)))?;

    let end = next.pred_opt().unwrap_or(start);
    Ok((start, end))
}

/// Number of days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> i64 {
    month_bounds(date.year(), date.month())
        .map(|(_, end)| end.day() as i64)
        .unwrap_or(30)
}
