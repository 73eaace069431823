//! Transaction display formatting
//!
//! History register and single-transaction details.

use std::collections::HashMap;

use super::{separator, truncate};
use crate::config::settings::Settings;
use crate::models::{Category, CategoryId, EntryKind, Money, Transaction};

fn category_name(category_id: Option<CategoryId>, categories: &HashMap<CategoryId, Category>) -> String {
    category_id
        .and_then(|id| categories.get(&id))
        .map(|c| c.label())
        .unwrap_or_else(|| "(uncategorized)".to_string())
}

/// Format a single transaction as a register row
pub fn format_transaction_row(
    txn: &Transaction,
    categories: &HashMap<CategoryId, Category>,
    settings: &Settings,
) -> String {
    let description = if txn.description.is_empty() {
        "-"
    } else {
        &txn.description
    };

    format!(
        "{:10} {} {} {:>12}  {}",
        txn.date.format(&settings.date_format),
        truncate(&category_name(txn.category_id, categories), 18),
        truncate(description, 24),
        txn.signed_amount().format_with_symbol(&settings.currency_symbol),
        txn.id
    )
}

/// Format transactions as a register with income and expense totals
pub fn format_transaction_register(
    transactions: &[Transaction],
    categories: &HashMap<CategoryId, Category>,
    settings: &Settings,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:10} {:18} {:24} {:>12}  {}\n",
        "Date", "Category", "Description", "Amount", "ID"
    ));
    output.push_str(&separator(82));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, categories, settings));
        output.push('\n');
    }

    let income: Money = transactions
        .iter()
        .filter(|t| t.kind == EntryKind::Income)
        .map(|t| t.amount)
        .sum();
    let expenses: Money = transactions
        .iter()
        .filter(|t| t.kind == EntryKind::Expense)
        .map(|t| t.amount)
        .sum();

    let symbol = &settings.currency_symbol;
    output.push_str(&separator(82));
    output.push('\n');
    output.push_str(&format!(
        "{} transactions  Income: {}  Expenses: {}  Net: {}\n",
        transactions.len(),
        income.format_with_symbol(symbol),
        expenses.format_with_symbol(symbol),
        (income - expenses).format_with_symbol(symbol)
    ));

    output
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    category: Option<&Category>,
    settings: &Settings,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Kind:        {}\n", txn.kind));
    output.push_str(&format!(
        "Date:        {}\n",
        txn.date.format(&settings.date_format)
    ));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(&settings.currency_symbol)
    ));

    match category {
        Some(c) => output.push_str(&format!("Category:    {}\n", c.label())),
        None => output.push_str("Category:    (uncategorized)\n"),
    }

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(cents: i64, description: &str) -> Transaction {
        Transaction::with_details(
            EntryKind::Expense,
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            None,
            description,
        )
    }

    #[test]
    fn test_format_transaction_row() {
        let txn = expense(5000, "Groceries run");
        let formatted = format_transaction_row(&txn, &HashMap::new(), &Settings::default());

        assert!(formatted.contains("2025-01-15"));
        assert!(formatted.contains("Groceries run"));
        assert!(formatted.contains("-€50.00"));
        assert!(formatted.contains("(uncategorized)"));
    }

    #[test]
    fn test_format_empty_register() {
        let formatted = format_transaction_register(&[], &HashMap::new(), &Settings::default());
        assert!(formatted.contains("No transactions found"));
    }

    #[test]
    fn test_register_totals() {
        let mut salary = expense(200000, "Salary");
        salary.kind = EntryKind::Income;
        let txns = vec![expense(5000, "Lunch"), salary];

        let formatted = format_transaction_register(&txns, &HashMap::new(), &Settings::default());
        assert!(formatted.contains("2 transactions"));
        assert!(formatted.contains("Income: €2000.00"));
        assert!(formatted.contains("Expenses: €50.00"));
        assert!(formatted.contains("Net: €1950.00"));
    }

    #[test]
    fn test_format_transaction_details() {
        let food = Category::with_details("Food", EntryKind::Expense, "🍔", 0);
        let txn = expense(1299, "Pizza");

        let formatted = format_transaction_details(&txn, Some(&food), &Settings::default());
        assert!(formatted.contains("Kind:        expense"));
        assert!(formatted.contains("€12.99"));
        assert!(formatted.contains("🍔 Food"));
        assert!(formatted.contains("Pizza"));
    }
}
