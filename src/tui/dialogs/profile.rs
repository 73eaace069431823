//! Budget profile dialog
//!
//! The setup steps from the settings view: monthly income, monthly savings
//! and fixed monthly expenses.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use super::{dialog_block, error_line, form_hints};
use crate::error::SetAsideResult;
use crate::models::form::parse_positive_amount;
use crate::models::Money;
use crate::services::ProfileService;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::input::TextInput;

/// Which setup step the form edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFormKind {
    Income,
    Savings,
    FixedExpense,
}

impl ProfileFormKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Income => "Monthly Income",
            Self::Savings => "Monthly Savings",
            Self::FixedExpense => "Add Fixed Expense",
        }
    }

    fn hint(self) -> &'static str {
        match self {
            Self::Income => "Net income you expect every month",
            Self::Savings => "Amount to put away every month",
            Self::FixedExpense => "Rent, subscriptions, insurance...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileField {
    Name,
    #[default]
    Amount,
}

/// State for the profile form dialog
#[derive(Debug, Clone)]
pub struct ProfileFormState {
    pub kind: ProfileFormKind,
    pub name_input: TextInput,
    pub amount_input: TextInput,
    pub focused_field: ProfileField,
    pub error_message: Option<String>,
}

impl ProfileFormState {
    pub fn new(kind: ProfileFormKind) -> Self {
        let focused_field = match kind {
            ProfileFormKind::FixedExpense => ProfileField::Name,
            ProfileFormKind::Income | ProfileFormKind::Savings => ProfileField::Amount,
        };
        Self {
            kind,
            name_input: TextInput::new().placeholder("e.g. Rent"),
            amount_input: TextInput::new().placeholder("0.00"),
            focused_field,
            error_message: None,
        }
    }

    /// Only fixed expenses have a name field
    pub fn toggle_field(&mut self) {
        if self.kind == ProfileFormKind::FixedExpense {
            self.focused_field = match self.focused_field {
                ProfileField::Name => ProfileField::Amount,
                ProfileField::Amount => ProfileField::Name,
            };
        }
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focused_field {
            ProfileField::Name => &mut self.name_input,
            ProfileField::Amount => &mut self.amount_input,
        }
    }

    /// Income and savings may be zero; fixed expenses must be positive
    fn parse_amount(&self) -> Result<Money, String> {
        let raw = self.amount_input.value();
        match self.kind {
            ProfileFormKind::FixedExpense => {
                parse_positive_amount(raw).map_err(|e| e.to_string())
            }
            ProfileFormKind::Income | ProfileFormKind::Savings => match Money::parse(raw.trim()) {
                Ok(amount) if !amount.is_negative() => Ok(amount),
                _ => Err("Enter a valid amount of zero or more".to_string()),
            },
        }
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Render the profile dialog
pub fn render(frame: &mut Frame, app: &App) {
    let palette = app.palette();
    let form = &app.profile_form;
    let area = centered_rect_fixed(60, 10, frame.area());

    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            form.kind.hint(),
            Style::default().fg(palette.muted),
        )),
        Line::from(""),
    ];
    if form.kind == ProfileFormKind::FixedExpense {
        lines.push(
            form.name_input
                .line("Name", form.focused_field == ProfileField::Name, &palette),
        );
    }
    lines.push(form.amount_input.line(
        &format!("Amount ({})", app.symbol()),
        form.focused_field == ProfileField::Amount,
        &palette,
    ));
    lines.push(Line::from(""));
    lines.push(error_line(form.error_message.as_deref(), &palette));
    lines.push(form_hints(&palette));

    let paragraph = Paragraph::new(lines).block(dialog_block(form.kind.title(), &palette));
    frame.render_widget(paragraph, area);
}

/// Handle key input for the profile dialog
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.profile_form.toggle_field()
        }
        KeyCode::Enter => {
            if let Err(e) = save_profile(app) {
                app.profile_form.set_error(e.to_string());
            }
        }
        code => {
            let form = &mut app.profile_form;
            form.error_message = None;
            let input = form.focused_input();
            match code {
                KeyCode::Char(c) => input.insert(c),
                KeyCode::Backspace => input.backspace(),
                KeyCode::Delete => input.delete(),
                KeyCode::Left => input.move_left(),
                KeyCode::Right => input.move_right(),
                KeyCode::Home => input.move_start(),
                KeyCode::End => input.move_end(),
                _ => {}
            }
        }
    }
}

fn save_profile(app: &mut App) -> SetAsideResult<()> {
    let amount = match app.profile_form.parse_amount() {
        Ok(amount) => amount,
        Err(message) => {
            app.profile_form.set_error(message);
            return Ok(());
        }
    };

    let service = ProfileService::new(app.storage);
    let status = match app.profile_form.kind {
        ProfileFormKind::Income => {
            service.set_income(amount)?;
            format!("Monthly income set to {}", amount.format_with_symbol(app.symbol()))
        }
        ProfileFormKind::Savings => {
            service.set_savings(amount)?;
            format!("Monthly savings set to {}", amount.format_with_symbol(app.symbol()))
        }
        ProfileFormKind::FixedExpense => {
            let name = app.profile_form.name_input.value().trim().to_string();
            if name.is_empty() {
                app.profile_form.set_error("Enter a name for the expense");
                return Ok(());
            }
            let expense = service.add_fixed_expense(&name, amount)?;
            format!("Added {}", expense.name)
        }
    };

    app.sync_setup_flag();
    app.close_dialog();
    app.set_status(status);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SetAsidePaths;
    use crate::config::settings::Settings;
    use crate::storage::Storage;
    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c)));
        }
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SetAsidePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()
    }

    #[test]
    fn test_income_accepts_zero_fixed_does_not() {
        let mut form = ProfileFormState::new(ProfileFormKind::Income);
        form.amount_input.set("0");
        assert_eq!(form.parse_amount(), Ok(Money::zero()));

        let mut form = ProfileFormState::new(ProfileFormKind::FixedExpense);
        form.amount_input.set("0");
        assert!(form.parse_amount().is_err());
    }

    #[test]
    fn test_toggle_field_only_for_fixed_expense() {
        let mut form = ProfileFormState::new(ProfileFormKind::Savings);
        form.toggle_field();
        assert_eq!(form.focused_field, ProfileField::Amount);

        let mut form = ProfileFormState::new(ProfileFormKind::FixedExpense);
        assert_eq!(form.focused_field, ProfileField::Name);
        form.toggle_field();
        assert_eq!(form.focused_field, ProfileField::Amount);
    }

    #[test]
    fn test_setup_steps_complete_profile() {
        let (_temp_dir, storage) = create_test_storage();
        let mut settings = Settings::default();
        let mut app = App::new(&storage, &mut settings, today());

        app.open_profile_form(ProfileFormKind::Income);
        type_text(&mut app, "2400");
        handle_key(&mut app, key(KeyCode::Enter));
        assert!(!app.has_dialog());

        app.open_profile_form(ProfileFormKind::FixedExpense);
        type_text(&mut app, "Rent");
        handle_key(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "900");
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.status_message.as_deref(), Some("Added Rent"));
        assert!(!app.settings.setup_completed);

        app.open_profile_form(ProfileFormKind::Savings);
        type_text(&mut app, "300");
        handle_key(&mut app, key(KeyCode::Enter));

        assert!(app.settings.setup_completed);
        let profile = storage.profile.get().unwrap();
        assert_eq!(profile.disposable_monthly(), Money::from_cents(120_000));
    }

    #[test]
    fn test_income_form_prefills_current_value() {
        let (_temp_dir, storage) = create_test_storage();
        ProfileService::new(&storage)
            .set_income(Money::from_cents(150_000))
            .unwrap();
        let mut settings = Settings::default();
        let mut app = App::new(&storage, &mut settings, today());

        app.open_profile_form(ProfileFormKind::Income);
        assert_eq!(app.profile_form.amount_input.value(), "1500.00");
    }
}
