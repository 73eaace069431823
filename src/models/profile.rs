//! Budget profile model
//!
//! The monthly figures entered once during setup: expected income, fixed
//! monthly expenses (rent, subscriptions, ...) and the savings goal. What is
//! left after them is the disposable amount spread over the days of a month.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::FixedExpenseId;
use super::money::Money;

/// A recurring monthly expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedExpense {
    pub id: FixedExpenseId,
    pub name: String,
    pub amount: Money,
    pub created_at: DateTime<Utc>,
}

impl FixedExpense {
    pub fn new(name: impl Into<String>, amount: Money) -> Self {
        Self {
            id: FixedExpenseId::new(),
            name: name.into(),
            amount,
            created_at: Utc::now(),
        }
    }
}

/// Monthly budget profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetProfile {
    /// Expected monthly income
    #[serde(default)]
    pub monthly_income: Money,

    #[serde(default)]
    pub fixed_expenses: Vec<FixedExpense>,

    /// Amount to save every month
    #[serde(default)]
    pub monthly_savings: Money,

    #[serde(default)]
    pub income_set: bool,

    #[serde(default)]
    pub savings_set: bool,

    pub updated_at: Option<DateTime<Utc>>,
}

impl BudgetProfile {
    /// Sum of all fixed monthly expenses
    pub fn fixed_total(&self) -> Money {
        self.fixed_expenses.iter().map(|e| e.amount).sum()
    }

    /// Income left each month after fixed expenses and savings
    pub fn disposable_monthly(&self) -> Money {
        self.monthly_income - self.fixed_total() - self.monthly_savings
    }

    /// Whether income, fixed expenses and savings have all been entered
    pub fn is_complete(&self) -> bool {
        self.income_set && self.savings_set && !self.fixed_expenses.is_empty()
    }

    /// Validate the profile
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        if self.monthly_income.is_negative() {
            return Err(ProfileValidationError::NegativeIncome);
        }
        if self.monthly_savings.is_negative() {
            return Err(ProfileValidationError::NegativeSavings);
        }
        for expense in &self.fixed_expenses {
            if expense.name.trim().is_empty() {
                return Err(ProfileValidationError::EmptyFixedExpenseName);
            }
            if !expense.amount.is_positive() {
                return Err(ProfileValidationError::NonPositiveFixedExpense(
                    expense.name.clone(),
                ));
            }
        }
        Ok(())
    }
}

/// Validation errors for the budget profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    NegativeIncome,
    NegativeSavings,
    EmptyFixedExpenseName,
    NonPositiveFixedExpense(String),
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeIncome => write!(f, "Monthly income cannot be negative"),
            Self::NegativeSavings => write!(f, "Monthly savings cannot be negative"),
            Self::EmptyFixedExpenseName => write!(f, "Fixed expense name cannot be empty"),
            Self::NonPositiveFixedExpense(name) => {
                write!(f, "Fixed expense '{}' must be greater than zero", name)
            }
        }
    }
}

impl std::error::Error for ProfileValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disposable_monthly() {
        let profile = BudgetProfile {
            monthly_income: Money::from_cents(200000),
            fixed_expenses: vec![
                FixedExpense::new("Rent", Money::from_cents(70000)),
                FixedExpense::new("Phone", Money::from_cents(1500)),
            ],
            monthly_savings: Money::from_cents(20000),
            ..Default::default()
        };

        assert_eq!(profile.fixed_total().cents(), 71500);
        assert_eq!(profile.disposable_monthly().cents(), 108500);
    }

    #[test]
    fn test_disposable_can_go_negative() {
        let profile = BudgetProfile {
            monthly_income: Money::from_cents(1000),
            monthly_savings: Money::from_cents(5000),
            ..Default::default()
        };
        assert_eq!(profile.disposable_monthly().cents(), -4000);
    }

    #[test]
    fn test_is_complete() {
        let mut profile = BudgetProfile::default();
        assert!(!profile.is_complete());

        profile.income_set = true;
        profile.savings_set = true;
        assert!(!profile.is_complete());

        profile
            .fixed_expenses
            .push(FixedExpense::new("Rent", Money::from_cents(100)));
        assert!(profile.is_complete());
    }

    #[test]
    fn test_validate() {
        let mut profile = BudgetProfile::default();
        assert!(profile.validate().is_ok());

        profile.monthly_income = Money::from_cents(-1);
        assert_eq!(profile.validate(), Err(ProfileValidationError::NegativeIncome));

        profile.monthly_income = Money::zero();
        profile
            .fixed_expenses
            .push(FixedExpense::new("Gym", Money::zero()));
        assert_eq!(
            profile.validate(),
            Err(ProfileValidationError::NonPositiveFixedExpense("Gym".into()))
        );
    }
}
