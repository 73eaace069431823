//! Budget profile display formatting

use crate::models::BudgetProfile;

/// Format the monthly budget profile
pub fn format_profile(profile: &BudgetProfile, symbol: &str) -> String {
    let mut output = String::new();

    let income = if profile.income_set {
        profile.monthly_income.format_with_symbol(symbol)
    } else {
        "(not set)".to_string()
    };
    let savings = if profile.savings_set {
        profile.monthly_savings.format_with_symbol(symbol)
    } else {
        "(not set)".to_string()
    };

    output.push_str("Monthly Budget\n");
    output.push_str(&format!("  Income:           {}\n", income));
    output.push_str(&format!("  Savings:          {}\n", savings));
    output.push_str(&format!(
        "  Fixed Expenses:   {}\n",
        profile.fixed_total().format_with_symbol(symbol)
    ));

    for expense in &profile.fixed_expenses {
        output.push_str(&format!(
            "    - {:20} {:>12}  {}\n",
            expense.name,
            expense.amount.format_with_symbol(symbol),
            expense.id
        ));
    }

    output.push_str(&format!(
        "  Disposable:       {}\n",
        profile.disposable_monthly().format_with_symbol(symbol)
    ));

    if !profile.is_complete() {
        output.push_str("\nSetup incomplete. Use 'setaside setup' to enter income, fixed expenses and savings.\n");
    }

    output
}
