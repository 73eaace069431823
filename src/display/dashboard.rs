//! Dashboard display formatting

use super::{separator, urgency_marker};
use crate::config::settings::Settings;
use crate::services::DashboardSummary;

/// Format the daily dashboard
pub fn format_dashboard(summary: &DashboardSummary, settings: &Settings) -> String {
    let symbol = &settings.currency_symbol;
    let mut output = String::new();

    output.push_str(&format!(
        "SetAside - {}\n",
        summary.today.format(&settings.date_format)
    ));
    output.push_str(&separator(44));
    output.push('\n');

    output.push_str(&format!(
        "Daily budget:        {:>12}\n",
        summary.daily_budget.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Spent today:         {:>12}\n",
        summary.spent_today.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Remaining today:     {:>12}{}\n",
        summary.remaining_today.format_with_symbol(symbol),
        if summary.is_over_budget() { "  over budget" } else { "" }
    ));
    output.push('\n');

    output.push_str(&format!(
        "Base per day:        {:>12}\n",
        summary.base_daily.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Set aside per day:   {:>12}\n",
        summary.future.total_daily.format_with_symbol(symbol)
    ));
    output.push('\n');

    output.push_str(&format!(
        "Spent this month:    {:>12}\n",
        summary.spent_this_month.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Left this month:     {:>12}  ({} days)\n",
        summary.remaining_this_month.format_with_symbol(symbol),
        summary.days_left_in_month
    ));

    if !summary.upcoming.is_empty() {
        output.push_str("\nUpcoming:\n");
        for expense in &summary.upcoming {
            output.push_str(&format!(
                "{} {:20} {:>12}  {}  ({} days)\n",
                urgency_marker(expense.urgency(summary.today)),
                expense.name,
                expense.amount.format_with_symbol(symbol),
                expense.due_date.format(&settings.date_format),
                expense.days_remaining(summary.today)
            ));
        }
    }

    if !summary.profile.is_complete() {
        output.push_str("\nSetup incomplete. Run 'setaside setup' to enter your monthly budget.\n");
    }

    output
}
