//! Help dialog
//!
//! Shows contextual keyboard shortcuts

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActiveView, App};
use crate::tui::layout::centered_rect;
use crate::tui::theme::Palette;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let palette = app.palette();
    let area = centered_rect(60, 70, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(palette.title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));

    let paragraph = Paragraph::new(help_lines(app.active_view, &palette))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Help lines for the current view
fn help_lines(view: ActiveView, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Global Keys", palette),
        Line::from(""),
        key_line("q", "Quit application", palette),
        key_line("?", "Show/hide help", palette),
        key_line("1-5", "Jump to a view", palette),
        key_line("Tab/←/→", "Next/previous view", palette),
        key_line("a", "Record an expense", palette),
        Line::from(""),
    ];

    lines.push(heading(view.title(), palette));
    lines.push(Line::from(""));
    match view {
        ActiveView::Dashboard => {
            lines.push(key_line("i", "Record income", palette));
            lines.push(key_line("f", "Plan a future expense", palette));
        }
        ActiveView::History => {
            lines.push(key_line("j/k", "Move selection down/up", palette));
            lines.push(key_line("i", "Record income", palette));
            lines.push(key_line("e/Enter", "Edit transaction", palette));
            lines.push(key_line("d", "Delete transaction", palette));
        }
        ActiveView::FutureExpenses => {
            lines.push(key_line("j/k", "Move selection down/up", palette));
            lines.push(key_line("n", "Plan a future expense", palette));
            lines.push(key_line("e/Enter", "Edit future expense", palette));
            lines.push(key_line("d", "Delete future expense", palette));
        }
        ActiveView::Stats => {
            lines.push(Line::from(Span::styled(
                "Spending for the current month and the last six months",
                Style::default().fg(palette.muted),
            )));
        }
        ActiveView::Settings => {
            lines.push(key_line("j/k", "Move selection down/up", palette));
            lines.push(key_line("Enter", "Change the selected setting", palette));
            lines.push(key_line("d", "Remove selected fixed expense", palette));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(
        "Press any key to close",
        Style::default().fg(palette.muted),
    )]));

    lines
}

fn heading(text: &str, palette: &Palette) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_string(),
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(palette.warning),
    )])
}

/// Create a formatted key line
fn key_line(key: &str, description: &str, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(palette.key)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(palette.text)),
    ])
}
