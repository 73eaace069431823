//! Settings view
//!
//! Appearance, the monthly budget (the setup steps), export and reset, as
//! one selectable list.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::models::{BudgetProfile, FixedExpenseId};
use crate::tui::app::App;

/// One selectable row of the settings view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    Theme,
    Currency,
    Income,
    Savings,
    FixedExpense(FixedExpenseId),
    AddFixedExpense,
    Export,
    Reset,
}

/// Rows in display order for the current profile
pub fn settings_items(profile: &BudgetProfile) -> Vec<SettingsItem> {
    let mut items = vec![
        SettingsItem::Theme,
        SettingsItem::Currency,
        SettingsItem::Income,
        SettingsItem::Savings,
    ];
    items.extend(
        profile
            .fixed_expenses
            .iter()
            .map(|e| SettingsItem::FixedExpense(e.id)),
    );
    items.push(SettingsItem::AddFixedExpense);
    items.push(SettingsItem::Export);
    items.push(SettingsItem::Reset);
    items
}

/// Row under the cursor, if any
pub fn selected_item(app: &App) -> Option<SettingsItem> {
    let profile = app.storage.profile.get().unwrap_or_default();
    settings_items(&profile)
        .get(app.selected_setting_index)
        .copied()
}

/// Render the settings view
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let symbol = app.symbol();
    let profile = app.storage.profile.get().unwrap_or_default();
    let items = settings_items(&profile);

    let not_set = || "not set".to_string();
    let row = |label: &str, value: String| {
        ListItem::new(Line::from(vec![
            Span::styled(format!("{:<24}", label), Style::default().fg(palette.text)),
            Span::styled(value, Style::default().fg(palette.accent)),
        ]))
    };

    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| match item {
            SettingsItem::Theme => row("Theme", app.settings.theme.to_string()),
            SettingsItem::Currency => row("Currency symbol", app.settings.currency_symbol.clone()),
            SettingsItem::Income => row(
                "Monthly income",
                if profile.income_set {
                    profile.monthly_income.format_with_symbol(symbol)
                } else {
                    not_set()
                },
            ),
            SettingsItem::Savings => row(
                "Monthly savings",
                if profile.savings_set {
                    profile.monthly_savings.format_with_symbol(symbol)
                } else {
                    not_set()
                },
            ),
            SettingsItem::FixedExpense(id) => {
                let (name, amount) = profile
                    .fixed_expenses
                    .iter()
                    .find(|e| e.id == *id)
                    .map(|e| (e.name.clone(), e.amount.format_with_symbol(symbol)))
                    .unwrap_or_default();
                row(&format!("  {}", name), amount)
            }
            SettingsItem::AddFixedExpense => row(
                "+ Add fixed expense",
                format!(
                    "{} in total",
                    profile.fixed_total().format_with_symbol(symbol)
                ),
            ),
            SettingsItem::Export => row("Export data", "JSON".to_string()),
            SettingsItem::Reset => ListItem::new(Line::from(Span::styled(
                "Reset all data",
                Style::default().fg(palette.negative),
            ))),
        })
        .collect();

    let title = if profile.is_complete() {
        format!(
            " Settings  (disposable {} per month) ",
            profile.disposable_monthly().format_with_symbol(symbol)
        )
    } else {
        " Settings  (setup incomplete) ".to_string()
    };

    let list = List::new(list_items)
        .block(
            Block::default()
                .title(title)
                .title_style(palette.title())
                .borders(Borders::ALL)
                .border_style(palette.border(true)),
        )
        .highlight_style(palette.highlight())
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.selected_setting_index.min(items.len() - 1)));

    frame.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SetAsidePaths;
    use crate::config::settings::Settings;
    use crate::models::{FixedExpense, Money};
    use crate::storage::Storage;
    use crate::tui::app::ActiveView;
    use crate::tui::views::test_support::screen;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_items_include_fixed_expenses() {
        let mut profile = BudgetProfile::default();
        assert_eq!(settings_items(&profile).len(), 7);

        let rent = FixedExpense::new("Rent", Money::from_cents(90_000));
        profile.fixed_expenses.push(rent.clone());
        let items = settings_items(&profile);
        assert_eq!(items[4], SettingsItem::FixedExpense(rent.id));
        assert_eq!(items[5], SettingsItem::AddFixedExpense);
    }

    #[test]
    fn test_settings_view_renders_values() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SetAsidePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let mut settings = Settings::default();
        let mut app = App::new(
            &storage,
            &mut settings,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        );
        app.switch_view(ActiveView::Settings);
        let text = screen(&app);

        assert!(text.contains("dark"));
        assert!(text.contains("not set"));
        assert!(text.contains("Reset all data"));
        assert_eq!(selected_item(&app), Some(SettingsItem::Theme));
    }
}
