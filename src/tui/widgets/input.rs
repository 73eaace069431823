//! Text input field
//!
//! Single-line input with a character-based cursor, rendered as one line
//! with a label inside the form dialogs.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::tui::theme::Palette;

/// Width of the right-aligned field label
pub const LABEL_WIDTH: usize = 12;

/// A single-line text input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    content: String,
    /// Cursor position in characters
    cursor: usize,
    placeholder: String,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set content, cursor at the end
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.set(content);
        self
    }

    /// Replace the content, cursor at the end
    pub fn set(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.content.chars().count();
    }

    fn byte_index(&self) -> usize {
        self.content
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let index = self.byte_index();
        self.content.insert(index, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let index = self.byte_index();
            self.content.remove(index);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.content.chars().count() {
            let index = self.byte_index();
            self.content.remove(index);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.content.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.chars().count();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn value(&self) -> &str {
        &self.content
    }

    /// Render as `label: value`, with a block cursor when focused
    pub fn line(&self, label: &str, focused: bool, palette: &Palette) -> Line<'static> {
        let label_style = if focused {
            palette.title()
        } else {
            Style::default().fg(palette.accent)
        };
        let mut spans = vec![Span::styled(
            format!("{:>width$}: ", label, width = LABEL_WIDTH),
            label_style,
        )];

        if !focused {
            if self.content.is_empty() {
                spans.push(Span::styled(
                    self.placeholder.clone(),
                    Style::default().fg(palette.muted),
                ));
            } else {
                spans.push(Span::styled(
                    self.content.clone(),
                    Style::default().fg(palette.text),
                ));
            }
            return Line::from(spans);
        }

        let text_style = Style::default().fg(palette.text);
        let before: String = self.content.chars().take(self.cursor).collect();
        let at = self.content.chars().nth(self.cursor).unwrap_or(' ');
        let after: String = self.content.chars().skip(self.cursor + 1).collect();

        spans.push(Span::styled(before, text_style));
        spans.push(Span::styled(
            at.to_string(),
            Style::default()
                .fg(Color::Black)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(after, text_style));
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing() {
        let mut input = TextInput::new().content("12.5");
        input.insert('0');
        assert_eq!(input.value(), "12.50");

        input.move_start();
        input.delete();
        assert_eq!(input.value(), "2.50");

        input.move_end();
        input.backspace();
        input.backspace();
        assert_eq!(input.value(), "2.");
    }

    #[test]
    fn test_multibyte_cursor() {
        let mut input = TextInput::new().content("€5");
        input.move_left();
        input.insert('1');
        assert_eq!(input.value(), "€15");

        input.move_start();
        input.move_right();
        input.backspace();
        assert_eq!(input.value(), "15");
    }

    #[test]
    fn test_line_shows_placeholder_when_empty() {
        let palette = Palette::for_theme(crate::config::settings::Theme::Dark);
        let input = TextInput::new().placeholder("YYYY-MM-DD");
        let line = input.line("Due date", false, &palette);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.ends_with("Due date: YYYY-MM-DD"));
    }
}
