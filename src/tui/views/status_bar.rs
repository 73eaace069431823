//! Status bar view
//!
//! Shows what is left to spend today, the last status message, and key hints

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::services::BudgetService;
use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();

    let mut spans = vec![];

    if let Ok(summary) = BudgetService::new(app.storage).dashboard(app.today) {
        spans.push(Span::styled(" Today: ", Style::default().fg(palette.text)));
        spans.push(Span::styled(
            summary.remaining_today.format_with_symbol(app.symbol()),
            palette
                .amount(summary.remaining_today.cents())
                .add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.as_str(),
            Style::default().fg(palette.warning),
        ));
    }

    // Key hints (right-aligned)
    let hints = " q:Quit  ?:Help  a:Expense ";

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(palette.muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
