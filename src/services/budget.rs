//! Budget service
//!
//! Computes the dashboard: how much can be spent today once fixed expenses,
//! savings and the daily set-aside for planned expenses are accounted for.

use chrono::{Datelike, NaiveDate};

use crate::error::SetAsideResult;
use crate::models::{BudgetProfile, EntryKind, FutureExpense, Money};
use crate::storage::Storage;

use super::future_expense::{FutureExpenseService, FutureExpenseSummary};
use super::transaction::{days_in_month, TransactionService};

/// Number of upcoming expenses shown on the dashboard
pub const UPCOMING_ON_DASHBOARD: usize = 3;

/// Service for budget calculations
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// Everything the dashboard shows for one day
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub today: NaiveDate,
    pub profile: BudgetProfile,
    /// Income minus fixed expenses minus savings
    pub disposable_monthly: Money,
    /// Disposable amount spread evenly over the month
    pub base_daily: Money,
    pub future: FutureExpenseSummary,
    /// `base_daily` minus the daily set-aside
    pub daily_budget: Money,
    pub spent_today: Money,
    pub remaining_today: Money,
    pub spent_this_month: Money,
    pub income_this_month: Money,
    pub remaining_this_month: Money,
    /// Days left in the month, today included
    pub days_left_in_month: i64,
    pub upcoming: Vec<FutureExpense>,
}

impl DashboardSummary {
    /// Whether today's spending went over the daily budget
    pub fn is_over_budget(&self) -> bool {
        self.remaining_today.is_negative()
    }
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Disposable monthly amount divided by the days in `today`'s month
    pub fn base_daily(profile: &BudgetProfile, today: NaiveDate) -> Money {
        profile.disposable_monthly().div_round(days_in_month(today))
    }

    /// Build the dashboard for `today`
    pub fn dashboard(&self, today: NaiveDate) -> SetAsideResult<DashboardSummary> {
        let profile = self.storage.profile.get()?;
        let futures = FutureExpenseService::new(self.storage);
        let transactions = TransactionService::new(self.storage);

        let disposable_monthly = profile.disposable_monthly();
        let base_daily = Self::base_daily(&profile, today);
        let future = futures.summary(today)?;
        let daily_budget = base_daily - future.total_daily;

        let spent_today = transactions.total_on(today, EntryKind::Expense)?;
        let spent_this_month =
            transactions.total_in_month(today.year(), today.month(), EntryKind::Expense)?;
        let income_this_month =
            transactions.total_in_month(today.year(), today.month(), EntryKind::Income)?;

        let days_left_in_month = days_in_month(today) - today.day() as i64 + 1;

        tracing::debug!(
            %today,
            %base_daily,
            set_aside = %future.total_daily,
            %daily_budget,
            "dashboard computed"
        );

        Ok(DashboardSummary {
            today,
            disposable_monthly,
            base_daily,
            daily_budget,
            spent_today,
            remaining_today: daily_budget - spent_today,
            spent_this_month,
            income_this_month,
            remaining_this_month: disposable_monthly - spent_this_month,
            days_left_in_month,
            upcoming: futures.upcoming(today, UPCOMING_ON_DASHBOARD)?,
            future,
            profile,
        })
    }
}
