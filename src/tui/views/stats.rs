//! Stats view
//!
//! Current month totals, spending per category and a six month trend

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::Money;
use crate::reports::{MonthlyStats, MonthlyTrend};
use crate::tui::app::App;
use crate::tui::theme::Palette;

/// Months shown in the trend panel
const TREND_MONTHS: u32 = 6;

const BAR_WIDTH: usize = 20;

/// Render the stats view
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_month(frame, app, chunks[0]);
    render_trend(frame, app, chunks[1]);
}

fn block(title: String, palette: &Palette) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(palette.title())
        .borders(Borders::ALL)
        .border_style(palette.border(true))
}

/// `width` cells of bar for `part` out of `whole`
fn bar(part: Money, whole: Money, width: usize) -> String {
    if whole.cents() <= 0 {
        return String::new();
    }
    let filled = (part.cents().max(0) as u128 * width as u128 / whole.cents() as u128) as usize;
    "█".repeat(filled.min(width))
}

fn render_month(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let symbol = app.symbol();

    let stats = match MonthlyStats::current(app.storage, app.today) {
        Ok(stats) => stats,
        Err(e) => {
            let text = Paragraph::new(e.to_string())
                .block(block(" Stats ".into(), &palette))
                .style(Style::default().fg(palette.negative));
            frame.render_widget(text, area);
            return;
        }
    };

    let row = |label: &str, value: Money, style: Style| {
        Line::from(vec![
            Span::styled(format!(" {:<18}", label), Style::default().fg(palette.muted)),
            Span::styled(format!("{:>14}", value.format_with_symbol(symbol)), style),
        ])
    };

    let mut lines = vec![
        row(
            "Income",
            stats.total_income,
            Style::default().fg(palette.positive),
        ),
        row(
            "Expenses",
            stats.total_expenses,
            Style::default().fg(palette.negative),
        ),
        row("Net", stats.net, palette.amount(stats.net.cents())),
        row(
            "Average per day",
            stats.average_daily,
            Style::default().fg(palette.text),
        ),
        Line::from(""),
    ];

    if stats.categories.is_empty() {
        lines.push(Line::from(Span::styled(
            " No spending recorded this month.",
            Style::default().fg(palette.muted),
        )));
    }

    let largest = stats
        .categories
        .first()
        .map(|c| c.total)
        .unwrap_or_default();
    for category in &stats.categories {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<18}", crate::display::truncate(&category.label, 18)),
                Style::default().fg(palette.text),
            ),
            Span::styled(
                format!("{:>12} ", category.total.format_with_symbol(symbol)),
                Style::default().fg(palette.text),
            ),
            Span::styled(
                format!("{:>5.1}% ", category.percentage),
                Style::default().fg(palette.muted),
            ),
            Span::styled(
                bar(category.total, largest, BAR_WIDTH / 2),
                Style::default().fg(palette.accent),
            ),
        ]));
    }

    let title = format!(" Stats {}-{:02} ", stats.year, stats.month);
    frame.render_widget(Paragraph::new(lines).block(block(title, &palette)), area);
}

fn render_trend(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let symbol = app.symbol();

    let trend = match MonthlyTrend::generate(app.storage, app.today, TREND_MONTHS) {
        Ok(trend) => trend,
        Err(e) => {
            let text = Paragraph::new(e.to_string())
                .block(block(" Trend ".into(), &palette))
                .style(Style::default().fg(palette.negative));
            frame.render_widget(text, area);
            return;
        }
    };

    let peak = trend.peak();
    let mut lines = Vec::new();
    for point in &trend.points {
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", point.label()), Style::default().fg(palette.text)),
            Span::styled(
                format!("{:>12}", point.net.format_with_symbol(symbol)),
                palette.amount(point.net.cents()),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::raw("   in  "),
            Span::styled(
                bar(point.income, peak, BAR_WIDTH),
                Style::default().fg(palette.positive),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::raw("   out "),
            Span::styled(
                bar(point.expenses, peak, BAR_WIDTH),
                Style::default().fg(palette.negative),
            ),
        ]));
    }

    let title = format!(" Last {} months ", TREND_MONTHS);
    frame.render_widget(Paragraph::new(lines).block(block(title, &palette)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SetAsidePaths;
    use crate::config::settings::Settings;
    use crate::models::{EntryKind, TransactionFields};
    use crate::services::TransactionService;
    use crate::storage::Storage;
    use crate::tui::app::ActiveView;
    use crate::tui::views::test_support::screen;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_bar_scaling() {
        let whole = Money::from_cents(1000);
        assert_eq!(bar(whole, whole, 10).chars().count(), 10);
        assert_eq!(bar(Money::from_cents(500), whole, 10).chars().count(), 5);
        assert_eq!(bar(whole, Money::zero(), 10), "");
    }

    #[test]
    fn test_stats_view_shows_month_totals() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SetAsidePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

        TransactionService::new(&storage)
            .create(TransactionFields {
                kind: EntryKind::Expense,
                amount: Money::from_cents(4_000),
                date: today,
                category_id: None,
                description: String::new(),
            })
            .unwrap();

        let mut settings = Settings::default();
        let mut app = App::new(&storage, &mut settings, today);
        app.switch_view(ActiveView::Stats);
        let text = screen(&app);

        assert!(text.contains("Stats 2025-06"));
        assert!(text.contains("€40.00"));
        // 40.00 over ten elapsed days
        assert!(text.contains("€4.00"));
        assert!(text.contains("Uncategorized"));
        assert!(text.contains("2025-01"));
    }
}
