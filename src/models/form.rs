//! Form drafts
//!
//! Raw string input as typed into a form (TUI dialog or CLI arguments) and the
//! validation that turns it into typed values. Checks run in field order and
//! stop at the first problem, so the user sees one message at a time.

use chrono::NaiveDate;
use std::fmt;

use super::category::EntryKind;
use super::future_expense::FutureExpense;
use super::ids::CategoryId;
use super::money::{Money, MoneyParseError};
use super::transaction::Transaction;

/// Date format accepted by forms
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a form was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    EmptyName,
    InvalidAmount,
    AmountTooLarge,
    AmountBelowOneCent,
    MissingDueDate,
    InvalidDueDate(String),
    MissingDate,
    InvalidDate(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Enter the expense name"),
            Self::InvalidAmount => write!(f, "Enter a valid amount greater than zero"),
            Self::AmountTooLarge => {
                write!(f, "Enter an amount no larger than {}", Money::MAX_INPUT)
            }
            Self::AmountBelowOneCent => write!(f, "Amounts are kept to the cent; enter at least 0.01"),
            Self::MissingDueDate => write!(f, "Select a due date"),
            Self::InvalidDueDate(s) => write!(f, "Invalid due date '{}'. Use YYYY-MM-DD", s),
            Self::MissingDate => write!(f, "Enter a date"),
            Self::InvalidDate(s) => write!(f, "Invalid date '{}'. Use YYYY-MM-DD", s),
        }
    }
}

impl std::error::Error for FormError {}

/// Parse a strictly positive amount, the way every form field does
pub fn parse_positive_amount(raw: &str) -> Result<Money, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FormError::InvalidAmount);
    }
    match Money::parse(raw) {
        Ok(amount) if amount.is_positive() => Ok(amount),
        Ok(amount) if amount.is_zero() && has_nonzero_digit(raw) && !raw.starts_with('-') => {
            Err(FormError::AmountBelowOneCent)
        }
        Err(MoneyParseError::TooLarge(_)) if !raw.starts_with('-') => {
            Err(FormError::AmountTooLarge)
        }
        _ => Err(FormError::InvalidAmount),
    }
}

fn has_nonzero_digit(raw: &str) -> bool {
    raw.chars().any(|c| matches!(c, '1'..='9'))
}

/// Parse a form date
pub fn parse_form_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), FORM_DATE_FORMAT).ok()
}

/// Validated values of a future expense form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FutureExpenseFields {
    pub name: String,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub category_id: Option<CategoryId>,
    pub description: String,
}

/// Unvalidated future expense form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FutureExpenseDraft {
    pub name: String,
    pub amount: String,
    pub due_date: String,
    pub category_id: Option<CategoryId>,
    pub description: String,
}

impl FutureExpenseDraft {
    /// An empty draft with the due date pre-filled
    pub fn with_due_date(due_date: NaiveDate) -> Self {
        Self {
            due_date: due_date.format(FORM_DATE_FORMAT).to_string(),
            ..Default::default()
        }
    }

    /// A draft pre-filled from an existing expense, for editing
    pub fn from_expense(expense: &FutureExpense) -> Self {
        Self {
            name: expense.name.clone(),
            amount: expense.amount.to_string(),
            due_date: expense.due_date.format(FORM_DATE_FORMAT).to_string(),
            category_id: expense.category_id,
            description: expense.description.clone(),
        }
    }

    /// Validate the draft: name, then amount, then due date
    pub fn validate(&self) -> Result<FutureExpenseFields, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::EmptyName);
        }

        let amount = parse_positive_amount(&self.amount)?;

        let due_raw = self.due_date.trim();
        if due_raw.is_empty() {
            return Err(FormError::MissingDueDate);
        }
        let due_date =
            parse_form_date(due_raw).ok_or_else(|| FormError::InvalidDueDate(due_raw.to_string()))?;

        Ok(FutureExpenseFields {
            name: name.to_string(),
            amount,
            due_date,
            category_id: self.category_id,
            description: self.description.trim().to_string(),
        })
    }
}

/// Validated values of a transaction form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionFields {
    pub kind: EntryKind,
    pub amount: Money,
    pub date: NaiveDate,
    pub category_id: Option<CategoryId>,
    pub description: String,
}

/// Unvalidated transaction form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub kind: EntryKind,
    pub amount: String,
    pub date: String,
    pub category_id: Option<CategoryId>,
    pub description: String,
}

impl TransactionDraft {
    /// An empty expense draft dated `today`
    pub fn dated(today: NaiveDate) -> Self {
        Self {
            date: today.format(FORM_DATE_FORMAT).to_string(),
            ..Default::default()
        }
    }

    /// A draft pre-filled from an existing transaction, for editing
    pub fn from_transaction(txn: &Transaction) -> Self {
        Self {
            kind: txn.kind,
            amount: txn.amount.to_string(),
            date: txn.date.format(FORM_DATE_FORMAT).to_string(),
            category_id: txn.category_id,
            description: txn.description.clone(),
        }
    }

    /// Validate the draft: amount, then date
    pub fn validate(&self) -> Result<TransactionFields, FormError> {
        let amount = parse_positive_amount(&self.amount)?;

        let date_raw = self.date.trim();
        if date_raw.is_empty() {
            return Err(FormError::MissingDate);
        }
        let date =
            parse_form_date(date_raw).ok_or_else(|| FormError::InvalidDate(date_raw.to_string()))?;

        Ok(TransactionFields {
            kind: self.kind,
            amount,
            date,
            category_id: self.category_id,
            description: self.description.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> FutureExpenseDraft {
        FutureExpenseDraft {
            name: "Car insurance".into(),
            amount: "480".into(),
            due_date: "2025-06-30".into(),
            category_id: None,
            description: "  yearly  ".into(),
        }
    }

    #[test]
    fn test_valid_future_expense_draft() {
        let fields = valid_draft().validate().unwrap();
        assert_eq!(fields.name, "Car insurance");
        assert_eq!(fields.amount.cents(), 48000);
        assert_eq!(fields.due_date, NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
        assert_eq!(fields.description, "yearly");
    }

    #[test]
    fn test_rejects_empty_name() {
        let mut draft = valid_draft();
        draft.name = "   ".into();
        assert_eq!(draft.validate(), Err(FormError::EmptyName));
    }

    #[test]
    fn test_rejects_bad_amounts() {
        for amount in ["", "abc", "0", "0.00", "-5", "12x"] {
            let mut draft = valid_draft();
            draft.amount = amount.into();
            assert_eq!(draft.validate(), Err(FormError::InvalidAmount), "amount {:?}", amount);
        }
    }

    #[test]
    fn test_largest_amount_accrues_without_overflow() {
        let mut draft = valid_draft();
        draft.amount = "999999999999.99".into();
        let fields = draft.validate().unwrap();
        assert_eq!(fields.amount, Money::MAX_INPUT);

        let expense = FutureExpense::new("House", fields.amount, fields.due_date);
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let per_day = expense.daily_amount(today);
        assert!(per_day.is_positive());
        assert!(per_day < fields.amount);

        draft.amount = "50000000000000000".into();
        assert_eq!(draft.validate(), Err(FormError::AmountTooLarge));
        draft.amount = "1000000000000".into();
        assert_eq!(draft.validate(), Err(FormError::AmountTooLarge));
    }

    #[test]
    fn test_extra_decimals_round_to_the_cent() {
        let mut draft = valid_draft();
        draft.amount = "1.999".into();
        assert_eq!(draft.validate().unwrap().amount.cents(), 200);

        draft.amount = "0.005".into();
        assert_eq!(draft.validate().unwrap().amount.cents(), 1);

        draft.amount = "0.004".into();
        assert_eq!(draft.validate(), Err(FormError::AmountBelowOneCent));
    }

    #[test]
    fn test_rejects_missing_or_bad_due_date() {
        let mut draft = valid_draft();
        draft.due_date = "".into();
        assert_eq!(draft.validate(), Err(FormError::MissingDueDate));

        draft.due_date = "30/06/2025".into();
        assert_eq!(
            draft.validate(),
            Err(FormError::InvalidDueDate("30/06/2025".into()))
        );
    }

    #[test]
    fn test_name_checked_before_amount() {
        let draft = FutureExpenseDraft::default();
        assert_eq!(draft.validate(), Err(FormError::EmptyName));
    }

    #[test]
    fn test_draft_from_expense_round_trips() {
        let due = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let mut expense = FutureExpense::new("School books", Money::from_cents(12050), due);
        expense.description = "second year".into();

        let draft = FutureExpenseDraft::from_expense(&expense);
        assert_eq!(draft.amount, "120.50");
        assert_eq!(draft.due_date, "2025-09-01");

        let fields = draft.validate().unwrap();
        assert_eq!(fields.amount, expense.amount);
        assert_eq!(fields.due_date, due);
    }

    #[test]
    fn test_transaction_draft() {
        let today = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
        let mut draft = TransactionDraft::dated(today);
        assert_eq!(draft.validate(), Err(FormError::InvalidAmount));

        draft.amount = "7,40".into();
        draft.kind = EntryKind::Income;
        let fields = draft.validate().unwrap();
        assert_eq!(fields.amount.cents(), 740);
        assert_eq!(fields.date, today);
        assert_eq!(fields.kind, EntryKind::Income);

        draft.date = " ".into();
        assert_eq!(draft.validate(), Err(FormError::MissingDate));
    }
}
