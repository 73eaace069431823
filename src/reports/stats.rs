//! Monthly statistics
//!
//! Income, expenses and spending per category for one calendar month.

use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use std::io::Write;

use crate::error::{SetAsideError, SetAsideResult};
use crate::models::{CategoryId, EntryKind, Money};
use crate::services::transaction::month_bounds;
use crate::services::{CategoryService, TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Spending in one category
#[derive(Debug, Clone)]
pub struct CategorySpending {
    /// `None` for uncategorized spending
    pub category_id: Option<CategoryId>,
    pub label: String,
    pub total: Money,
    pub transaction_count: usize,
    /// Share of the month's spending
    pub percentage: f64,
}

/// Statistics for one month
#[derive(Debug, Clone)]
pub struct MonthlyStats {
    pub year: i32,
    pub month: u32,
    pub total_income: Money,
    pub total_expenses: Money,
    /// Income minus expenses
    pub net: Money,
    /// Spending per elapsed day
    pub average_daily: Money,
    /// Days the average is taken over
    pub days_counted: i64,
    /// Largest first
    pub categories: Vec<CategorySpending>,
    pub transaction_count: usize,
}

impl MonthlyStats {
    /// Generate statistics for `year`-`month` as seen on `today`
    ///
    /// For the current month the daily average covers the days elapsed so
    /// far; for other months it covers the whole month.
    pub fn generate(storage: &Storage, year: i32, month: u32, today: NaiveDate) -> SetAsideResult<Self> {
        let (start, end) = month_bounds(year, month)?;
        let transactions =
            TransactionService::new(storage).list(TransactionFilter::new().month(year, month))?;
        let categories = CategoryService::new(storage).lookup()?;

        let mut per_category: HashMap<Option<CategoryId>, (Money, usize)> = HashMap::new();
        let mut total_income = Money::zero();
        let mut total_expenses = Money::zero();

        for txn in &transactions {
            match txn.kind {
                EntryKind::Income => total_income += txn.amount,
                EntryKind::Expense => {
                    total_expenses += txn.amount;
                    let entry = per_category
                        .entry(txn.category_id)
                        .or_insert((Money::zero(), 0));
                    entry.0 += txn.amount;
                    entry.1 += 1;
                }
            }
        }

        let mut rows: Vec<CategorySpending> = per_category
            .into_iter()
            .map(|(category_id, (total, count))| {
                let label = match category_id.and_then(|id| categories.get(&id)) {
                    Some(category) => category.label(),
                    None => "Uncategorized".to_string(),
                };
                CategorySpending {
                    category_id,
                    label,
                    total,
                    transaction_count: count,
                    percentage: total.percent_of(total_expenses),
                }
            })
            .collect();
        rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.label.cmp(&b.label)));

        let days_counted = if today >= start && today <= end {
            today.day() as i64
        } else {
            end.day() as i64
        };

        Ok(Self {
            year,
            month,
            total_income,
            total_expenses,
            net: total_income - total_expenses,
            average_daily: total_expenses.div_round(days_counted),
            days_counted,
            categories: rows,
            transaction_count: transactions.len(),
        })
    }

    /// Generate statistics for the month containing `today`
    pub fn current(storage: &Storage, today: NaiveDate) -> SetAsideResult<Self> {
        Self::generate(storage, today.year(), today.month(), today)
    }

    /// The `limit` largest spending categories
    pub fn top_categories(&self, limit: usize) -> &[CategorySpending] {
        &self.categories[..self.categories.len().min(limit)]
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Statistics for {}-{:02}\n", self.year, self.month));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Income:          {:>14}\n", self.total_income.format_with_symbol(symbol)));
        output.push_str(&format!("Expenses:        {:>14}\n", self.total_expenses.format_with_symbol(symbol)));
        output.push_str(&format!("Net:             {:>14}\n", self.net.format_with_symbol(symbol)));
        output.push_str(&format!(
            "Average per day: {:>14}  ({} days)\n\n",
            self.average_daily.format_with_symbol(symbol),
            self.days_counted
        ));

        if self.categories.is_empty() {
            output.push_str("No spending recorded this month.\n");
            return output;
        }

        output.push_str(&format!("{:<30} {:>12} {:>6} {:>7}\n", "Category", "Amount", "Count", "%"));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.categories {
            output.push_str(&format!(
                "{:<30} {:>12} {:>6} {:>6.1}%\n",
                row.label,
                row.total.format_with_symbol(symbol),
                row.transaction_count,
                row.percentage
            ));
        }

        output
    }

    /// Export the category breakdown as CSV
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> SetAsideResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(["Month", "Category", "Amount", "Transactions", "Percentage"])
            .map_err(|e| SetAsideError::Export(e.to_string()))?;

        let month = format!("{}-{:02}", self.year, self.month);
        for row in &self.categories {
            csv_writer
                .write_record([
                    month.clone(),
                    row.label.clone(),
                    row.total.to_string(),
                    row.transaction_count.to_string(),
                    format!("{:.2}", row.percentage),
                ])
                .map_err(|e| SetAsideError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| SetAsideError::Export(e.to_string()))?;
        Ok(())
    }
}
