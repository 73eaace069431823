//! Future expense model
//!
//! A future expense is a planned, dated outlay. Its amount is spread over the
//! days left until the due date, giving the amount to put aside each day.

use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, FutureExpenseId};
use super::money::Money;

/// Expenses due within this many days are flagged as urgent
pub const URGENT_WITHIN_DAYS: i64 = 7;

/// Countdown window for the progress bar: 0% this many days out, 100% when due
pub const PROGRESS_WINDOW_DAYS: i64 = 30;

/// Due-date proximity, used to highlight expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Normal,
    /// Due within [`URGENT_WITHIN_DAYS`]
    Soon,
    /// Due today or overdue
    Due,
}

/// A planned expense with a due date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FutureExpense {
    pub id: FutureExpenseId,

    pub name: String,

    /// Total amount due (positive)
    pub amount: Money,

    pub due_date: NaiveDate,

    pub category_id: Option<CategoryId>,

    #[serde(default)]
    pub description: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl FutureExpense {
    /// Create a new future expense
    pub fn new(name: impl Into<String>, amount: Money, due_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: FutureExpenseId::new(),
            name: name.into(),
            amount,
            due_date,
            category_id: None,
            description: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Days left until the due date, or 0 once it is today or past
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        days_remaining(self.due_date, today)
    }

    /// Amount to set aside per day so the expense is covered on its due date
    pub fn daily_amount(&self, today: NaiveDate) -> Money {
        daily_amount(self.amount, self.due_date, today)
    }

    /// Whether the due date has been reached
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.due_date <= today
    }

    /// How close the due date is
    pub fn urgency(&self, today: NaiveDate) -> Urgency {
        match self.days_remaining(today) {
            0 => Urgency::Due,
            d if d <= URGENT_WITHIN_DAYS => Urgency::Soon,
            _ => Urgency::Normal,
        }
    }

    /// How far the countdown to the due date has run, 0 to 100
    pub fn progress_percent(&self, today: NaiveDate) -> u16 {
        let days = self.days_remaining(today).min(PROGRESS_WINDOW_DAYS);
        (100 - days * 100 / PROGRESS_WINDOW_DAYS) as u16
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), FutureExpenseValidationError> {
        if self.name.trim().is_empty() {
            return Err(FutureExpenseValidationError::EmptyName);
        }
        if !self.amount.is_positive() {
            return Err(FutureExpenseValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}

impl fmt::Display for FutureExpense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} due {})", self.name, self.amount, self.due_date)
    }
}

/// Whole days from `today` until `due_date`, clamped at zero
pub fn days_remaining(due_date: NaiveDate, today: NaiveDate) -> i64 {
    (due_date - today).num_days().max(0)
}

/// `amount / days_remaining` rounded to the cent, or zero when nothing remains
pub fn daily_amount(amount: Money, due_date: NaiveDate, today: NaiveDate) -> Money {
    let days = days_remaining(due_date, today);
    if days <= 0 {
        return Money::zero();
    }
    amount.div_round(days)
}

/// Sum of the per-expense daily amounts, each rounded first
pub fn total_daily_amount<'a, I>(expenses: I, today: NaiveDate) -> Money
where
    I: IntoIterator<Item = &'a FutureExpense>,
{
    expenses
        .into_iter()
        .map(|expense| expense.daily_amount(today))
        .sum()
}

/// Sum of the full amounts still to pay
pub fn total_amount<'a, I>(expenses: I) -> Money
where
    I: IntoIterator<Item = &'a FutureExpense>,
{
    expenses.into_iter().map(|expense| expense.amount).sum()
}

/// Default due date for a new expense: one month from today
///
/// Clamped to the last day of the target month (Jan 31 -> Feb 28/29).
pub fn default_due_date(today: NaiveDate) -> NaiveDate {
    today.checked_add_months(Months::new(1)).unwrap_or(today)
}

/// Validation errors for future expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FutureExpenseValidationError {
    EmptyName,
    NonPositiveAmount,
}

impl fmt::Display for FutureExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense name cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Amount must be greater than zero"),
        }
    }
}

impl std::error::Error for FutureExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(cents: i64, due: NaiveDate) -> FutureExpense {
        FutureExpense::new("Test", Money::from_cents(cents), due)
    }

    #[test]
    fn test_days_remaining() {
        let today = date(2025, 3, 10);
        assert_eq!(days_remaining(date(2025, 3, 20), today), 10);
        assert_eq!(days_remaining(date(2025, 3, 11), today), 1);
        assert_eq!(days_remaining(today, today), 0);
        assert_eq!(days_remaining(date(2025, 3, 1), today), 0);
    }

    #[test]
    fn test_progress_percent() {
        let today = date(2025, 3, 10);
        assert_eq!(expense(100, today).progress_percent(today), 100);
        assert_eq!(expense(100, date(2025, 3, 1)).progress_percent(today), 100);
        assert_eq!(expense(100, date(2025, 3, 13)).progress_percent(today), 90);
        assert_eq!(expense(100, date(2025, 3, 25)).progress_percent(today), 50);
        assert_eq!(expense(100, date(2025, 4, 9)).progress_percent(today), 0);
        assert_eq!(expense(100, date(2025, 6, 1)).progress_percent(today), 0);
    }

    #[test]
    fn test_daily_amount_rounds_to_cents() {
        let today = date(2025, 3, 10);
        // 100.00 over 3 days = 33.333... -> 33.33
        assert_eq!(expense(10000, date(2025, 3, 13)).daily_amount(today).cents(), 3333);
        // 200.00 over 3 days = 66.666... -> 66.67
        assert_eq!(expense(20000, date(2025, 3, 13)).daily_amount(today).cents(), 6667);
        // 300.00 over 30 days = 10.00
        assert_eq!(expense(30000, date(2025, 4, 9)).daily_amount(today).cents(), 1000);
    }

    #[test]
    fn test_daily_amount_zero_when_due_or_past() {
        let today = date(2025, 3, 10);
        assert!(expense(10000, today).daily_amount(today).is_zero());
        assert!(expense(10000, date(2025, 1, 1)).daily_amount(today).is_zero());
        assert!(expense(10000, today).is_due(today));
    }

    #[test]
    fn test_total_daily_amount_is_sum_of_rounded_parts() {
        let today = date(2025, 3, 10);
        let expenses = vec![
            expense(10000, date(2025, 3, 13)), // 33.33
            expense(10000, date(2025, 3, 13)), // 33.33
            expense(10000, date(2025, 3, 13)), // 33.33
            expense(5000, date(2025, 3, 1)),   // past -> 0
        ];

        let expected: Money = expenses.iter().map(|e| e.daily_amount(today)).sum();
        assert_eq!(total_daily_amount(&expenses, today), expected);
        assert_eq!(total_daily_amount(&expenses, today).cents(), 9999);
        assert!(total_daily_amount(&Vec::<FutureExpense>::new(), today).is_zero());
    }

    #[test]
    fn test_total_amount() {
        let expenses = vec![
            expense(10000, date(2025, 3, 13)),
            expense(2550, date(2025, 1, 1)),
        ];
        assert_eq!(total_amount(&expenses).cents(), 12550);
    }

    #[test]
    fn test_default_due_date() {
        assert_eq!(default_due_date(date(2025, 3, 10)), date(2025, 4, 10));
        assert_eq!(default_due_date(date(2025, 1, 31)), date(2025, 2, 28));
        assert_eq!(default_due_date(date(2024, 12, 15)), date(2025, 1, 15));
    }

    #[test]
    fn test_urgency() {
        let today = date(2025, 3, 10);
        assert_eq!(expense(100, date(2025, 3, 1)).urgency(today), Urgency::Due);
        assert_eq!(expense(100, today).urgency(today), Urgency::Due);
        assert_eq!(expense(100, date(2025, 3, 17)).urgency(today), Urgency::Soon);
        assert_eq!(expense(100, date(2025, 3, 18)).urgency(today), Urgency::Normal);
    }

    #[test]
    fn test_validate() {
        let mut e = expense(100, date(2025, 1, 1));
        assert!(e.validate().is_ok());

        e.name = "   ".into();
        assert_eq!(e.validate(), Err(FutureExpenseValidationError::EmptyName));

        e.name = "Tax".into();
        e.amount = Money::zero();
        assert_eq!(
            e.validate(),
            Err(FutureExpenseValidationError::NonPositiveAmount)
        );
    }
}
