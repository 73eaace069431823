//! Transaction model
//!
//! A transaction is a dated income or expense entry. Amounts are stored as
//! positive values; the direction comes from the kind.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::EntryKind;
use super::ids::{CategoryId, TransactionId};
use super::money::Money;

/// A recorded income or expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    #[serde(default)]
    pub kind: EntryKind,

    /// Always positive; see `signed_amount`
    pub amount: Money,

    pub category_id: Option<CategoryId>,

    pub date: NaiveDate,

    #[serde(default)]
    pub description: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(kind: EntryKind, amount: Money, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            kind,
            amount,
            category_id: None,
            date,
            description: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a transaction with all common fields
    pub fn with_details(
        kind: EntryKind,
        amount: Money,
        date: NaiveDate,
        category_id: Option<CategoryId>,
        description: impl Into<String>,
    ) -> Self {
        let mut txn = Self::new(kind, amount, date);
        txn.category_id = category_id;
        txn.description = description.into();
        txn
    }

    pub fn is_expense(&self) -> bool {
        self.kind == EntryKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == EntryKind::Income
    }

    /// Amount with sign: negative for expenses, positive for income
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            EntryKind::Expense => -self.amount,
            EntryKind::Income => self.amount,
        }
    }

    /// Whether the transaction falls in the given calendar month
    pub fn in_month(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.signed_amount(),
            self.description
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Amount must be greater than zero"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
