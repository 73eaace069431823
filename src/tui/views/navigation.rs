//! Navigation bar
//!
//! One tab per view with its number key; the active view is highlighted.

use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

use crate::tui::app::{ActiveView, App};

/// Render the navigation bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();

    let titles: Vec<Line> = ActiveView::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!("[{}] {}", i + 1, view.title())))
        .collect();

    let block = Block::default()
        .title(" SetAside ")
        .title_style(palette.title())
        .borders(Borders::ALL)
        .border_style(palette.border(false));

    let tabs = Tabs::new(titles)
        .block(block)
        .select(app.active_view.index())
        .style(Style::default().fg(palette.muted))
        .highlight_style(palette.highlight())
        .divider("│");

    frame.render_widget(tabs, area);
}
