//! Future expense display formatting
//!
//! Each row shows the daily set-aside as of a given day, with a marker for
//! expenses that are due soon.

use chrono::NaiveDate;
use std::collections::HashMap;

use super::{separator, truncate, urgency_marker};
use crate::config::settings::Settings;
use crate::models::{Category, CategoryId, FutureExpense};
use crate::services::FutureExpenseSummary;

/// Format future expenses as a table with their daily amounts
pub fn format_future_expense_list(
    expenses: &[FutureExpense],
    summary: &FutureExpenseSummary,
    today: NaiveDate,
    settings: &Settings,
) -> String {
    if expenses.is_empty() {
        return "No future expenses planned.\n".to_string();
    }

    let symbol = &settings.currency_symbol;
    let mut output = String::new();
    output.push_str(&format!(
        "  {:24} {:>12} {:10} {:>6} {:>10}  {}\n",
        "Name", "Amount", "Due", "Days", "Per Day", "ID"
    ));
    output.push_str(&separator(84));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format!(
            "{} {} {:>12} {:10} {:>6} {:>10}  {}\n",
            urgency_marker(expense.urgency(today)),
            truncate(&expense.name, 24),
            expense.amount.format_with_symbol(symbol),
            expense.due_date.format(&settings.date_format),
            expense.days_remaining(today),
            expense.daily_amount(today).format_with_symbol(symbol),
            expense.id
        ));
    }

    output.push_str(&separator(84));
    output.push('\n');
    output.push_str(&format!(
        "{} planned, {} in total, set aside {} per day\n",
        summary.count,
        summary.total_amount.format_with_symbol(symbol),
        summary.total_daily.format_with_symbol(symbol)
    ));

    output
}

/// Format one future expense with its daily amount
pub fn format_future_expense_details(
    expense: &FutureExpense,
    categories: &HashMap<CategoryId, Category>,
    today: NaiveDate,
    settings: &Settings,
) -> String {
    let symbol = &settings.currency_symbol;
    let mut output = String::new();

    output.push_str(&format!("Future Expense: {}\n", expense.name));
    output.push_str(&format!("  ID:             {}\n", expense.id));
    output.push_str(&format!(
        "  Amount:         {}\n",
        expense.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Due:            {}\n",
        expense.due_date.format(&settings.date_format)
    ));
    output.push_str(&format!(
        "  Days Remaining: {}\n",
        expense.days_remaining(today)
    ));
    output.push_str(&format!(
        "  Per Day:        {}\n",
        expense.daily_amount(today).format_with_symbol(symbol)
    ));

    if let Some(category) = expense.category_id.and_then(|id| categories.get(&id)) {
        output.push_str(&format!("  Category:       {}\n", category.label()));
    }
    if !expense.description.is_empty() {
        output.push_str(&format!("  Description:    {}\n", expense.description));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_empty_list() {
        let summary = FutureExpenseSummary {
            count: 0,
            total_amount: Money::zero(),
            total_daily: Money::zero(),
        };
        let output = format_future_expense_list(&[], &summary, date(2025, 1, 1), &Settings::default());
        assert!(output.contains("No future expenses planned"));
    }

    #[test]
    fn test_format_list_marks_urgent() {
        let today = date(2025, 1, 1);
        let expenses = vec![
            FutureExpense::new("Insurance", Money::from_cents(30000), date(2025, 1, 4)),
            FutureExpense::new("Holiday", Money::from_cents(90000), date(2025, 3, 1)),
        ];
        let summary = FutureExpenseSummary {
            count: 2,
            total_amount: Money::from_cents(120000),
            total_daily: Money::from_cents(10000 + 1525),
        };

        let output = format_future_expense_list(&expenses, &summary, today, &Settings::default());
        let lines: Vec<_> = output.lines().collect();

        assert!(lines[2].starts_with("! Insurance"));
        assert!(lines[2].contains("€100.00"));
        assert!(lines[3].starts_with("  Holiday"));
        assert!(output.contains("set aside €115.25 per day"));
    }

    #[test]
    fn test_format_details_due_today() {
        let today = date(2025, 1, 10);
        let expense = FutureExpense::new("Tax", Money::from_cents(50000), today);

        let output = format_future_expense_details(&expense, &HashMap::new(), today, &Settings::default());
        assert!(output.contains("Days Remaining: 0"));
        assert!(output.contains("Per Day:        €0.00"));
    }
}
