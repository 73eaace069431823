//! Monthly trend
//!
//! Income, expenses and net for the last N months, oldest first.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{SetAsideError, SetAsideResult};
use crate::models::{EntryKind, Money};
use crate::services::TransactionService;
use crate::storage::Storage;

/// Longest trend that can be requested (ten years)
pub const MAX_TREND_MONTHS: u32 = 120;

/// Totals for one month of the trend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendPoint {
    pub year: i32,
    pub month: u32,
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
}

impl TrendPoint {
    pub fn label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

/// Monthly trend report
#[derive(Debug, Clone)]
pub struct MonthlyTrend {
    pub points: Vec<TrendPoint>,
}

impl MonthlyTrend {
    /// Totals for the `months` months ending with the one containing `today`
    pub fn generate(storage: &Storage, today: NaiveDate, months: u32) -> SetAsideResult<Self> {
        if months == 0 {
            return Err(SetAsideError::Validation(
                "Trend needs at least one month".into(),
            ));
        }
        if months > MAX_TREND_MONTHS {
            return Err(SetAsideError::Validation(format!(
                "Trend covers at most {} months",
                MAX_TREND_MONTHS
            )));
        }

        let service = TransactionService::new(storage);
        let first_of_month = today.with_day(1).unwrap_or(today);

        let mut points = Vec::with_capacity(months as usize);
        for back in (0..months).rev() {
            let Some(start) = first_of_month.checked_sub_months(Months::new(back)) else {
                continue;
            };
            let (year, month) = (start.year(), start.month());
            let income = service.total_in_month(year, month, EntryKind::Income)?;
            let expenses = service.total_in_month(year, month, EntryKind::Expense)?;
            points.push(TrendPoint {
                year,
                month,
                income,
                expenses,
                net: income - expenses,
            });
        }

        Ok(Self { points })
    }

    /// Largest monthly income or expense, for scaling bars
    pub fn peak(&self) -> Money {
        self.points
            .iter()
            .map(|p| p.income.max(p.expenses))
            .max()
            .unwrap_or_default()
    }

    /// Format the trend with proportional bars
    pub fn format_terminal(&self, symbol: &str) -> String {
        const BAR_WIDTH: i64 = 24;

        let peak = self.peak();
        let bar = |amount: Money| -> String {
            if peak.is_zero() {
                return String::new();
            }
            let len = i128::from(amount.cents()) * i128::from(BAR_WIDTH)
                / i128::from(peak.cents());
            "█".repeat(len.clamp(0, i128::from(BAR_WIDTH)) as usize)
        };

        let mut output = String::new();
        output.push_str(&format!(
            "{:<8} {:>12} {:>12} {:>12}  {}\n",
            "Month", "Income", "Expenses", "Net", "Spending"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for point in &self.points {
            output.push_str(&format!(
                "{:<8} {:>12} {:>12} {:>12}  {}\n",
                point.label(),
                point.income.format_with_symbol(symbol),
                point.expenses.format_with_symbol(symbol),
                point.net.format_with_symbol(symbol),
                bar(point.expenses)
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SetAsidePaths;
    use crate::models::Transaction;
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

    #[test]
    fn test_trend_spans_year_boundary() {
        let (_temp_dir, storage) = create_test_storage();
        for (kind, cents, on) in [
            (EntryKind::Expense, 3000, date(2024, 12, 5)),
            (EntryKind::Income, 10000, date(2025, 1, 1)),
            (EntryKind::Expense, 4000, date(2025, 1, 20)),
            (EntryKind::Expense, 1000, date(2025, 2, 2)),
        ] {
            storage
                .transactions
                .upsert(Transaction::new(kind, Money::from_cents(cents), on))
                .unwrap();
        }

        let trend = MonthlyTrend::generate(&storage, date(2025, 2, 14), 3).unwrap();
        let labels: Vec<_> = trend.points.iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec!["2024-12", "2025-01", "2025-02"]);

        assert_eq!(trend.points[0].expenses.cents(), 3000);
        assert_eq!(trend.points[1].net.cents(), 6000);
        assert_eq!(trend.points[2].net.cents(), -1000);
        assert_eq!(trend.peak().cents(), 10000);
    }

    #[test]
    fn test_zero_months_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        assert!(MonthlyTrend::generate(&storage, date(2025, 1, 1), 0)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_month_count_is_capped() {
        let (_temp_dir, storage) = create_test_storage();
        let today = date(2025, 1, 15);

        let trend = MonthlyTrend::generate(&storage, today, MAX_TREND_MONTHS).unwrap();
        assert_eq!(trend.points.len(), MAX_TREND_MONTHS as usize);
        assert_eq!(trend.points[0].label(), "2015-02");

        assert!(MonthlyTrend::generate(&storage, today, 4_000_000_000)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_bars_handle_huge_amounts() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .transactions
            .upsert(Transaction::new(
                EntryKind::Expense,
                Money::MAX_INPUT,
                date(2025, 1, 3),
            ))
            .unwrap();

        let trend = MonthlyTrend::generate(&storage, date(2025, 1, 31), 1).unwrap();
        let text = trend.format_terminal("€");
        assert!(text.contains(&"█".repeat(24)));
    }

    #[test]
    fn test_format_without_data() {
        let (_temp_dir, storage) = create_test_storage();
        let trend = MonthlyTrend::generate(&storage, date(2025, 1, 31), 2).unwrap();
        let text = trend.format_terminal("€");
        assert!(text.contains("2024-12"));
        assert!(text.contains("€0.00"));
    }
}
