//! Dialog modules for the TUI
//!
//! Modal forms for transactions, future expenses and the budget profile,
//! plus confirmation and help.

pub mod confirm;
pub mod future_expense;
pub mod help;
pub mod profile;
pub mod transaction;

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

use crate::models::{Category, CategoryId};
use crate::tui::theme::Palette;
use crate::tui::widgets::input::LABEL_WIDTH;

/// Step through "no category" followed by `categories`, wrapping around
pub(crate) fn cycle_category(
    current: Option<CategoryId>,
    categories: &[Category],
    forward: bool,
) -> Option<CategoryId> {
    let options: Vec<Option<CategoryId>> = std::iter::once(None)
        .chain(categories.iter().map(|c| Some(c.id)))
        .collect();

    let position = options.iter().position(|o| *o == current).unwrap_or(0);
    let len = options.len();
    let next = if forward {
        (position + 1) % len
    } else {
        (position + len - 1) % len
    };
    options[next]
}

/// A `label: ◀ value ▶` selector line
pub(crate) fn selector_line(label: &str, value: &str, focused: bool, palette: &Palette) -> Line<'static> {
    let label_style = if focused {
        palette.title()
    } else {
        Style::default().fg(palette.accent)
    };
    let value_style = if focused {
        Style::default()
            .fg(palette.text)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text)
    };

    let mut spans = vec![Span::styled(
        format!("{:>width$}: ", label, width = LABEL_WIDTH),
        label_style,
    )];
    if focused {
        spans.push(Span::styled("◀ ", Style::default().fg(palette.key)));
        spans.push(Span::styled(value.to_string(), value_style));
        spans.push(Span::styled(" ▶", Style::default().fg(palette.key)));
    } else {
        spans.push(Span::styled(value.to_string(), value_style));
    }
    Line::from(spans)
}

/// Bordered block with a dialog title
pub(crate) fn dialog_block(title: &str, palette: &Palette) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title))
        .title_style(palette.title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
}

/// Key hints shown at the bottom of every form
pub(crate) fn form_hints(palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(palette.key)),
        Span::raw(" Next  "),
        Span::styled("[←/→]", Style::default().fg(palette.key)),
        Span::raw(" Choose  "),
        Span::styled("[Enter]", Style::default().fg(palette.positive)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(palette.negative)),
        Span::raw(" Cancel"),
    ])
}

/// Red error line, or an empty line
pub(crate) fn error_line(error: Option<&str>, palette: &Palette) -> Line<'static> {
    match error {
        Some(message) => Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(palette.negative),
        )),
        None => Line::from(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryKind;

    #[test]
    fn test_cycle_category_wraps() {
        let food = Category::new("Food", EntryKind::Expense);
        let home = Category::new("Home", EntryKind::Expense);
        let categories = vec![food.clone(), home.clone()];

        assert_eq!(cycle_category(None, &categories, true), Some(food.id));
        assert_eq!(cycle_category(Some(food.id), &categories, true), Some(home.id));
        assert_eq!(cycle_category(Some(home.id), &categories, true), None);
        assert_eq!(cycle_category(None, &categories, false), Some(home.id));
    }

    #[test]
    fn test_cycle_category_unknown_current() {
        let food = Category::new("Food", EntryKind::Expense);
        let stale = Category::new("Old", EntryKind::Expense);

        assert_eq!(
            cycle_category(Some(stale.id), &[food.clone()], true),
            Some(food.id)
        );
        assert_eq!(cycle_category(None, &[], true), None);
    }
}
