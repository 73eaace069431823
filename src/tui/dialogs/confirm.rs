//! Confirmation dialog
//!
//! Simple yes/no confirmation before destructive actions

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{App, ConfirmAction};
use crate::tui::layout::centered_rect_fixed;

/// Render a confirmation dialog
pub fn render(frame: &mut Frame, app: &App, action: ConfirmAction) {
    let palette = app.palette();
    let area = centered_rect_fixed(50, 7, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Confirm ")
        .title_style(palette.title().fg(palette.warning))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.warning));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            action.message(),
            Style::default().fg(palette.text),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Y]", Style::default().fg(palette.positive)),
            Span::raw(" Yes  "),
            Span::styled("[N]", Style::default().fg(palette.negative)),
            Span::raw(" No  "),
            Span::styled("[Esc]", Style::default().fg(palette.warning)),
            Span::raw(" Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Handle key input for the confirmation dialog
pub fn handle_key(app: &mut App, key: KeyEvent, action: ConfirmAction) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            app.close_dialog();
            if let Err(e) = app.confirm(action) {
                app.set_status(format!("Error: {}", e));
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.close_dialog();
            app.set_status("Cancelled");
        }
        _ => {}
    }
}
