//! Future expenses view
//!
//! Planned expenses with the amount to set aside per day for each, and the
//! totals across all of them.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::urgency_marker;
use crate::models::Urgency;
use crate::services::FutureExpenseService;
use crate::tui::app::App;
use crate::tui::layout::header_and_body;

const PROGRESS_BAR_WIDTH: usize = 10;

/// Text progress bar, `percent` of `width` cells filled
fn progress_bar(percent: u16, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width / 100).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Render the future expenses view
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let (header_area, table_area) = header_and_body(area, 3);
    render_summary(frame, app, header_area);
    render_table(frame, app, table_area);
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let symbol = app.symbol();
    let summary = FutureExpenseService::new(app.storage)
        .summary(app.today)
        .unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(
            format!(" {} planned  ", summary.count),
            Style::default().fg(palette.text),
        ),
        Span::styled("Total ", Style::default().fg(palette.muted)),
        Span::styled(
            summary.total_amount.format_with_symbol(symbol),
            Style::default().fg(palette.text),
        ),
        Span::styled("   Set aside per day ", Style::default().fg(palette.muted)),
        Span::styled(
            summary.total_daily.format_with_symbol(symbol),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   n:New  e:Edit  d:Delete", Style::default().fg(palette.muted)),
    ]);

    let block = Block::default()
        .title(" Future Expenses ")
        .title_style(palette.title())
        .borders(Borders::ALL)
        .border_style(palette.border(false));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let symbol = app.symbol();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(true));

    let expenses = app.future_expenses();
    if expenses.is_empty() {
        let text = Paragraph::new("Nothing planned. Press 'n' to add a future expense.")
            .block(block)
            .style(Style::default().fg(palette.muted));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(2),  // Urgency
        Constraint::Min(16),    // Name
        Constraint::Length(12), // Due
        Constraint::Length(6),  // Days
        Constraint::Length(PROGRESS_BAR_WIDTH as u16), // Progress
        Constraint::Length(13), // Amount
        Constraint::Length(12), // Per day
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("Name").style(bold),
        Cell::from("Due").style(bold),
        Cell::from("Days").style(bold),
        Cell::from("Progress").style(bold),
        Cell::from("Amount").style(bold),
        Cell::from("Per day").style(bold),
    ])
    .style(Style::default().fg(palette.warning))
    .height(1);

    let rows: Vec<Row> = expenses
        .iter()
        .map(|expense| {
            let urgency = expense.urgency(app.today);
            let (marker_color, bar_color) = match urgency {
                Urgency::Due => (palette.negative, palette.negative),
                Urgency::Soon => (palette.warning, palette.warning),
                Urgency::Normal => (palette.muted, palette.accent),
            };

            Row::new(vec![
                Cell::from(urgency_marker(urgency)).style(Style::default().fg(marker_color)),
                Cell::from(expense.name.clone()),
                Cell::from(expense.due_date.format(&app.settings.date_format).to_string()),
                Cell::from(format!("{:>5}", expense.days_remaining(app.today))),
                Cell::from(progress_bar(
                    expense.progress_percent(app.today),
                    PROGRESS_BAR_WIDTH,
                ))
                .style(Style::default().fg(bar_color)),
                Cell::from(format!("{:>12}", expense.amount.format_with_symbol(symbol))),
                Cell::from(format!(
                    "{:>11}",
                    expense.daily_amount(app.today).format_with_symbol(symbol)
                ))
                .style(Style::default().fg(palette.accent)),
            ])
            .style(Style::default().fg(palette.text))
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(palette.highlight())
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_future_index.min(expenses.len() - 1)));

    frame.render_stateful_widget(table, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::progress_bar;
    use crate::config::paths::SetAsidePaths;
    use crate::config::settings::Settings;
    use crate::models::{FutureExpenseFields, Money};
    use crate::services::FutureExpenseService;
    use crate::storage::Storage;
    use crate::tui::app::{ActiveView, App};
    use crate::tui::views::test_support::screen;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rows_show_daily_amounts_and_total() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SetAsidePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let today = date(2025, 1, 1);

        let service = FutureExpenseService::new(&storage);
        for (name, cents, due) in [
            ("Insurance", 10_000, date(2025, 1, 4)),
            ("Gift", 5_000, date(2025, 1, 11)),
        ] {
            service
                .create(FutureExpenseFields {
                    name: name.into(),
                    amount: Money::from_cents(cents),
                    due_date: due,
                    category_id: None,
                    description: String::new(),
                })
                .unwrap();
        }

        let mut settings = Settings::default();
        let mut app = App::new(&storage, &mut settings, today);
        app.switch_view(ActiveView::FutureExpenses);
        let text = screen(&app);

        // 100/3 = 33.33 and 50/10 = 5.00
        assert!(text.contains("€33.33"));
        assert!(text.contains("€5.00"));
        assert!(text.contains("€38.33"));
        assert!(text.contains("2 planned"));

        // 3 days left is 90% of the way, 10 days left is 67%
        assert!(text.contains("█████████░"));
        assert!(text.contains("██████░░░░"));
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 4), "░░░░");
        assert_eq!(progress_bar(50, 4), "██░░");
        assert_eq!(progress_bar(100, 4), "████");
        assert_eq!(progress_bar(250, 4), "████");
    }
}
