//! Color palettes for the light and dark themes

use ratatui::style::{Color, Modifier, Style};

use crate::config::settings::Theme;

/// Colors used by every view and dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub key: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub selection_bg: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                key: Color::Yellow,
                positive: Color::Green,
                negative: Color::Red,
                warning: Color::Yellow,
                selection_bg: Color::DarkGray,
            },
            Theme::Light => Self {
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                key: Color::Magenta,
                positive: Color::Green,
                negative: Color::Red,
                warning: Color::Rgb(180, 110, 0),
                selection_bg: Color::Rgb(220, 220, 220),
            },
        }
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        Style::default().fg(if focused { self.accent } else { self.muted })
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Green for positive, red for negative, plain text for zero
    pub fn amount(&self, cents: i64) -> Style {
        let color = match cents {
            c if c < 0 => self.negative,
            c if c > 0 => self.positive,
            _ => self.text,
        };
        Style::default().fg(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_differ() {
        assert_ne!(
            Palette::for_theme(Theme::Dark).text,
            Palette::for_theme(Theme::Light).text
        );
    }

    #[test]
    fn test_amount_style() {
        let palette = Palette::for_theme(Theme::Dark);
        assert_eq!(palette.amount(-1).fg, Some(palette.negative));
        assert_eq!(palette.amount(1).fg, Some(palette.positive));
        assert_eq!(palette.amount(0).fg, Some(palette.text));
    }
}
