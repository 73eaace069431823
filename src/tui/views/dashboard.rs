//! Dashboard view
//!
//! Today's budget: what can still be spent today after the daily set-aside
//! for planned expenses, the month so far, and the next expenses due.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::display::urgency_marker;
use crate::services::{BudgetService, DashboardSummary};
use crate::tui::app::App;
use crate::tui::theme::Palette;

/// Render the dashboard
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();

    let summary = match BudgetService::new(app.storage).dashboard(app.today) {
        Ok(summary) => summary,
        Err(e) => {
            let text = Paragraph::new(format!("Could not compute the budget: {}", e))
                .block(view_block("Dashboard", &palette))
                .style(Style::default().fg(palette.negative));
            frame.render_widget(text, area);
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_today(frame, app, &summary, &palette, chunks[0]);
    render_upcoming(frame, app, &summary, &palette, chunks[1]);
}

fn view_block(title: &str, palette: &Palette) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title))
        .title_style(palette.title())
        .borders(Borders::ALL)
        .border_style(palette.border(true))
}

fn amount_line(label: &str, value: String, style: Style, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<20}", label), Style::default().fg(palette.muted)),
        Span::styled(format!("{:>14}", value), style),
    ])
}

fn render_today(
    frame: &mut Frame,
    app: &App,
    summary: &DashboardSummary,
    palette: &Palette,
    area: Rect,
) {
    let symbol = app.symbol();
    let text = Style::default().fg(palette.text);

    let remaining_style = palette
        .amount(summary.remaining_today.cents())
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("  {}", summary.today.format(&app.settings.date_format)),
            Style::default().fg(palette.muted),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Left to spend today  ", Style::default().fg(palette.text)),
            Span::styled(
                summary.remaining_today.format_with_symbol(symbol),
                remaining_style,
            ),
        ]),
        Line::from(""),
        amount_line(
            "Daily budget",
            summary.daily_budget.format_with_symbol(symbol),
            text,
            palette,
        ),
        amount_line(
            "Spent today",
            summary.spent_today.format_with_symbol(symbol),
            text,
            palette,
        ),
        amount_line(
            "Base per day",
            summary.base_daily.format_with_symbol(symbol),
            Style::default().fg(palette.muted),
            palette,
        ),
        amount_line(
            "Set aside per day",
            summary.future.total_daily.format_with_symbol(symbol),
            Style::default().fg(palette.accent),
            palette,
        ),
        Line::from(""),
        amount_line(
            "Spent this month",
            summary.spent_this_month.format_with_symbol(symbol),
            text,
            palette,
        ),
        amount_line(
            "Income this month",
            summary.income_this_month.format_with_symbol(symbol),
            text,
            palette,
        ),
        amount_line(
            "Left this month",
            summary.remaining_this_month.format_with_symbol(symbol),
            palette.amount(summary.remaining_this_month.cents()),
            palette,
        ),
        Line::from(Span::styled(
            format!("  {} days left in the month", summary.days_left_in_month),
            Style::default().fg(palette.muted),
        )),
    ];

    if summary.is_over_budget() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Over today's budget",
            Style::default().fg(palette.negative),
        )));
    }

    if !summary.profile.is_complete() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Setup incomplete: enter income, fixed expenses and savings in Settings (5)",
            Style::default().fg(palette.warning),
        )));
    }

    let paragraph = Paragraph::new(lines).block(view_block("Dashboard", palette));
    frame.render_widget(paragraph, area);
}

fn render_upcoming(
    frame: &mut Frame,
    app: &App,
    summary: &DashboardSummary,
    palette: &Palette,
    area: Rect,
) {
    let symbol = app.symbol();
    let mut lines = Vec::new();

    if summary.upcoming.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No upcoming expenses. Press 'f' to plan one.",
            Style::default().fg(palette.muted),
        )));
    }

    for expense in &summary.upcoming {
        let days = expense.days_remaining(summary.today);
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", urgency_marker(expense.urgency(summary.today))),
                Style::default().fg(palette.warning),
            ),
            Span::styled(expense.name.clone(), Style::default().fg(palette.text)),
        ]));
        lines.push(Line::from(vec![
            Span::styled(
                format!(
                    "   {}  in {} days  ",
                    expense.amount.format_with_symbol(symbol),
                    days
                ),
                Style::default().fg(palette.muted),
            ),
            Span::styled(
                format!(
                    "{}/day",
                    expense.daily_amount(summary.today).format_with_symbol(symbol)
                ),
                Style::default().fg(palette.accent),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "  {} planned, {} in total",
            summary.future.count,
            summary.future.total_amount.format_with_symbol(symbol)
        ),
        Style::default().fg(palette.muted),
    )));

    let paragraph = Paragraph::new(lines).block(view_block("Upcoming", palette));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use crate::config::paths::SetAsidePaths;
    use crate::config::settings::Settings;
    use crate::models::{FutureExpenseFields, Money};
    use crate::services::{FutureExpenseService, ProfileService};
    use crate::storage::Storage;
    use crate::tui::app::App;
    use crate::tui::views::test_support::screen;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_dashboard_shows_budget_and_upcoming() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SetAsidePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        // June has 30 days: 3000 disposable is 100 per day
        let profile = ProfileService::new(&storage);
        profile.set_income(Money::from_cents(300_000)).unwrap();
        profile.set_savings(Money::zero()).unwrap();

        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        FutureExpenseService::new(&storage)
            .create(FutureExpenseFields {
                name: "Tyres".into(),
                amount: Money::from_cents(10_000),
                due_date: NaiveDate::from_ymd_opt(2025, 6, 11).unwrap(),
                category_id: None,
                description: String::new(),
            })
            .unwrap();

        let mut settings = Settings::default();
        let app = App::new(&storage, &mut settings, today);
        let text = screen(&app);

        assert!(text.contains("€90.00"), "daily budget missing:\n{}", text);
        assert!(text.contains("€10.00"));
        assert!(text.contains("Tyres"));
        assert!(text.contains("Setup incomplete"));
    }
}
