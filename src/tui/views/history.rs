//! History view
//!
//! All transactions, newest first, with the month's totals on top

use chrono::Datelike;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::truncate;
use crate::models::EntryKind;
use crate::services::{CategoryService, TransactionService};
use crate::tui::app::App;
use crate::tui::layout::header_and_body;

/// Render the transaction history
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let (header_area, table_area) = header_and_body(area, 3);
    render_header(frame, app, header_area);
    render_table(frame, app, table_area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let symbol = app.symbol();
    let service = TransactionService::new(app.storage);
    let (year, month) = (app.today.year(), app.today.month());

    let income = service
        .total_in_month(year, month, EntryKind::Income)
        .unwrap_or_default();
    let expenses = service
        .total_in_month(year, month, EntryKind::Expense)
        .unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(" This month  ", Style::default().fg(palette.muted)),
        Span::styled("Income ", Style::default().fg(palette.text)),
        Span::styled(income.format_with_symbol(symbol), palette.amount(income.cents())),
        Span::styled("   Expenses ", Style::default().fg(palette.text)),
        Span::styled(
            expenses.format_with_symbol(symbol),
            palette.amount(-expenses.cents()),
        ),
        Span::styled("   a:Expense  i:Income  e:Edit  d:Delete", Style::default().fg(palette.muted)),
    ]);

    let block = Block::default()
        .title(" History ")
        .title_style(palette.title())
        .borders(Borders::ALL)
        .border_style(palette.border(false));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(true));

    let transactions = app.transactions();
    if transactions.is_empty() {
        let text = Paragraph::new("No transactions yet. Press 'a' to record an expense.")
            .block(block)
            .style(Style::default().fg(palette.muted));
        frame.render_widget(text, area);
        return;
    }

    let categories = CategoryService::new(app.storage)
        .lookup()
        .unwrap_or_default();

    let widths = [
        Constraint::Length(12), // Date
        Constraint::Length(22), // Category
        Constraint::Min(16),    // Description
        Constraint::Length(14), // Amount
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("Date").style(bold),
        Cell::from("Category").style(bold),
        Cell::from("Description").style(bold),
        Cell::from("Amount").style(bold),
    ])
    .style(Style::default().fg(palette.warning))
    .height(1);

    let rows: Vec<Row> = transactions
        .iter()
        .map(|txn| {
            let category = txn
                .category_id
                .and_then(|id| categories.get(&id))
                .map(|c| c.label())
                .unwrap_or_else(|| "-".to_string());
            let amount = txn.signed_amount();

            Row::new(vec![
                Cell::from(txn.date.format(&app.settings.date_format).to_string()),
                Cell::from(truncate(&category, 22)),
                Cell::from(txn.description.clone()),
                Cell::from(format!("{:>13}", amount.format_with_symbol(app.symbol())))
                    .style(palette.amount(amount.cents())),
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
    state.select(Some(app.selected_transaction_index.min(transactions.len() - 1)));

    frame.render_stateful_widget(table, area, &mut state);
}

#[cfg(test)]
mod tests {
    use crate::config::paths::SetAsidePaths;
    use crate::config::settings::Settings;
    use crate::models::{EntryKind, Money, TransactionFields};
    use crate::services::TransactionService;
    use crate::storage::Storage;
    use crate::tui::app::{ActiveView, App};
    use crate::tui::views::test_support::screen;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_history_lists_signed_amounts() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SetAsidePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

        let service = TransactionService::new(&storage);
        service
            .create(TransactionFields {
                kind: EntryKind::Expense,
                amount: Money::from_cents(1250),
                date: today,
                category_id: None,
                description: "Groceries".into(),
            })
            .unwrap();
        service
            .create(TransactionFields {
                kind: EntryKind::Income,
                amount: Money::from_cents(200_000),
                date: today,
                category_id: None,
                description: "Salary".into(),
            })
            .unwrap();

        let mut settings = Settings::default();
        let mut app = App::new(&storage, &mut settings, today);
        app.switch_view(ActiveView::History);
        let text = screen(&app);

        assert!(text.contains("Groceries"));
        assert!(text.contains("-€12.50"));
        assert!(text.contains("€2000.00"));
    }
}
