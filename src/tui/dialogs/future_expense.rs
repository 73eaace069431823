//! Future expense dialog
//!
//! Form for planning an expense: name, amount, due date, category and a
//! note. While typing, the form previews how much has to be set aside per
//! day until the due date.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use super::{cycle_category, dialog_block, error_line, form_hints, selector_line};
use crate::models::future_expense::{daily_amount, days_remaining, default_due_date};
use crate::models::form::{parse_form_date, parse_positive_amount};
use crate::models::{
    CategoryId, EntryKind, FutureExpense, FutureExpenseDraft, FutureExpenseId, Money,
};
use crate::services::{CategoryService, FutureExpenseService};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::input::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FutureExpenseField {
    #[default]
    Name,
    Amount,
    DueDate,
    Category,
    Description,
}

impl FutureExpenseField {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Amount,
            Self::Amount => Self::DueDate,
            Self::DueDate => Self::Category,
            Self::Category => Self::Description,
            Self::Description => Self::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Name => Self::Description,
            Self::Amount => Self::Name,
            Self::DueDate => Self::Amount,
            Self::Category => Self::DueDate,
            Self::Description => Self::Category,
        }
    }
}

/// State for the future expense form dialog
#[derive(Debug, Clone)]
pub struct FutureExpenseFormState {
    pub focused_field: FutureExpenseField,
    pub name_input: TextInput,
    pub amount_input: TextInput,
    pub due_date_input: TextInput,
    pub category_id: Option<CategoryId>,
    pub description_input: TextInput,
    pub editing: Option<FutureExpenseId>,
    pub error_message: Option<String>,
}

impl FutureExpenseFormState {
    /// Empty form, due one month from `today`
    pub fn new(today: NaiveDate) -> Self {
        Self::from_draft(FutureExpenseDraft::with_due_date(default_due_date(today)), None)
    }

    /// Form pre-filled from an existing expense
    pub fn from_expense(expense: &FutureExpense) -> Self {
        Self::from_draft(FutureExpenseDraft::from_expense(expense), Some(expense.id))
    }

    fn from_draft(draft: FutureExpenseDraft, editing: Option<FutureExpenseId>) -> Self {
        Self {
            focused_field: FutureExpenseField::default(),
            name_input: TextInput::new().placeholder("e.g. Car insurance").content(draft.name),
            amount_input: TextInput::new().placeholder("0.00").content(draft.amount),
            due_date_input: TextInput::new()
                .placeholder("YYYY-MM-DD")
                .content(draft.due_date),
            category_id: draft.category_id,
            description_input: TextInput::new()
                .placeholder("Optional note")
                .content(draft.description),
            editing,
            error_message: None,
        }
    }

    pub fn to_draft(&self) -> FutureExpenseDraft {
        FutureExpenseDraft {
            name: self.name_input.value().to_string(),
            amount: self.amount_input.value().to_string(),
            due_date: self.due_date_input.value().to_string(),
            category_id: self.category_id,
            description: self.description_input.value().to_string(),
        }
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            FutureExpenseField::Name => Some(&mut self.name_input),
            FutureExpenseField::Amount => Some(&mut self.amount_input),
            FutureExpenseField::DueDate => Some(&mut self.due_date_input),
            FutureExpenseField::Description => Some(&mut self.description_input),
            FutureExpenseField::Category => None,
        }
    }

    /// Per-day set-aside for the values typed so far, if amount and date parse
    pub fn preview(&self, today: NaiveDate) -> Option<(Money, i64)> {
        let amount = parse_positive_amount(self.amount_input.value()).ok()?;
        let due_date = parse_form_date(self.due_date_input.value())?;
        Some((
            daily_amount(amount, due_date, today),
            days_remaining(due_date, today),
        ))
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Render the future expense dialog
pub fn render(frame: &mut Frame, app: &App) {
    let palette = app.palette();
    let form = &app.future_form;
    let area = centered_rect_fixed(64, 13, frame.area());

    frame.render_widget(Clear, area);

    let title = if form.editing.is_some() {
        "Edit Future Expense"
    } else {
        "Add Future Expense"
    };

    let category_name = form
        .category_id
        .and_then(|id| CategoryService::new(app.storage).get(id).ok().flatten())
        .map(|c| c.label())
        .unwrap_or_else(|| "(none)".to_string());

    let preview = match form.preview(app.today) {
        Some((_, 0)) => Line::from(Span::styled(
            "Due today or overdue: nothing left to set aside",
            Style::default().fg(palette.warning),
        )),
        Some((daily, days)) => Line::from(vec![
            Span::styled("Set aside ", Style::default().fg(palette.muted)),
            Span::styled(
                daily.format_with_symbol(app.symbol()),
                Style::default().fg(palette.accent),
            ),
            Span::styled(
                format!(" per day for {} days", days),
                Style::default().fg(palette.muted),
            ),
        ]),
        None => Line::from(""),
    };

    let focused = form.focused_field;
    let lines = vec![
        Line::from(""),
        form.name_input
            .line("Name", focused == FutureExpenseField::Name, &palette),
        form.amount_input
            .line("Amount", focused == FutureExpenseField::Amount, &palette),
        form.due_date_input
            .line("Due date", focused == FutureExpenseField::DueDate, &palette),
        selector_line(
            "Category",
            &category_name,
            focused == FutureExpenseField::Category,
            &palette,
        ),
        form.description_input
            .line("Description", focused == FutureExpenseField::Description, &palette),
        Line::from(""),
        preview,
        error_line(form.error_message.as_deref(), &palette),
        Line::from(""),
        form_hints(&palette),
    ];

    let paragraph = Paragraph::new(lines).block(dialog_block(title, &palette));
    frame.render_widget(paragraph, area);
}

/// Handle key input for the future expense dialog
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_dialog(),

        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
            app.future_form.prev_field()
        }
        KeyCode::Tab | KeyCode::Down => app.future_form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.future_form.prev_field(),

        KeyCode::Enter => save_future_expense(app),

        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
            if app.future_form.focused_field == FutureExpenseField::Category =>
        {
            let forward = key.code != KeyCode::Left;
            let categories = CategoryService::new(app.storage)
                .list(Some(EntryKind::Expense))
                .unwrap_or_default();
            let form = &mut app.future_form;
            form.category_id = cycle_category(form.category_id, &categories, forward);
        }

        code => {
            let form = &mut app.future_form;
            form.clear_error();
            if let Some(input) = form.focused_input() {
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
}

fn save_future_expense(app: &mut App) {
    let fields = match app.future_form.to_draft().validate() {
        Ok(fields) => fields,
        Err(e) => {
            app.future_form.set_error(e.to_string());
            return;
        }
    };

    let service = FutureExpenseService::new(app.storage);
    let result = match app.future_form.editing {
        Some(id) => service.update(id, fields),
        None => service.create(fields),
    };

    match result {
        Ok(expense) => {
            let verb = if app.future_form.editing.is_some() {
                "Updated"
            } else {
                "Planned"
            };
            app.close_dialog();
            app.set_status(format!("{} {}", verb, expense.name));
        }
        Err(e) => app.future_form.set_error(e.to_string()),
    }
}
