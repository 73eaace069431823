//! Category display formatting

use crate::models::{Category, EntryKind};
use crate::services::CategoryUsage;

/// Format categories as a table, expense categories first
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'setaside init' to create default categories."
            .to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.label().chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:<8}  {}\n",
        "Category",
        "Kind",
        "ID",
        width = name_width
    ));
    output.push_str(&format!(
        "{:-<width$}  {:-<8}  {:-<12}\n",
        "",
        "",
        "",
        width = name_width
    ));

    let mut previous: Option<EntryKind> = None;
    for category in categories {
        if previous.is_some_and(|k| k != category.kind) {
            output.push('\n');
        }
        previous = Some(category.kind);

        output.push_str(&format!(
            "{:<width$}  {:<8}  {}\n",
            category.label(),
            category.kind,
            category.id,
            width = name_width
        ));
    }

    output
}

/// Format category details with its usage counts
pub fn format_category_details(category: &Category, usage: &CategoryUsage) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:              {}\n", category.id));
    output.push_str(&format!("  Kind:            {}\n", category.kind));
    if !category.icon.is_empty() {
        output.push_str(&format!("  Icon:            {}\n", category.icon));
    }
    output.push_str(&format!("  Sort Order:      {}\n", category.sort_order));
    output.push_str(&format!("  Transactions:    {}\n", usage.transactions));
    output.push_str(&format!("  Future Expenses: {}\n", usage.future_expenses));

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        category.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        category.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_empty_list() {
        let output = format_category_list(&[]);
        assert!(output.contains("No categories found"));
        assert!(output.contains("setaside init"));
    }

    #[test]
    fn test_format_category_list_groups_kinds() {
        let categories = vec![
            Category::with_details("Food", EntryKind::Expense, "🍔", 0),
            Category::with_details("Salary", EntryKind::Income, "💼", 0),
        ];

        let output = format_category_list(&categories);
        assert!(output.contains("🍔 Food"));
        assert!(output.contains("income"));
        assert!(output.contains("\n\n"));
    }

    #[test]
    fn test_format_category_details() {
        let category = Category::new("Transport", EntryKind::Expense);
        let usage = CategoryUsage {
            transactions: 4,
            future_expenses: 1,
        };

        let output = format_category_details(&category, &usage);
        assert!(output.contains("Category: Transport"));
        assert!(output.contains("Transactions:    4"));
        assert!(output.contains("Future Expenses: 1"));
    }
}
