//! Transaction entry/edit dialog
//!
//! Modal form for recording an expense or income: kind, amount, date,
//! category and description. Validation runs through `TransactionDraft`,
//! the same path the CLI uses.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    text::Line,
    widgets::{Clear, Paragraph},
    Frame,
};

use super::{cycle_category, dialog_block, error_line, form_hints, selector_line};
use crate::models::{CategoryId, EntryKind, Transaction, TransactionDraft, TransactionId};
use crate::services::{CategoryService, TransactionService};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::input::TextInput;

/// Which field is currently focused in the transaction form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionField {
    Kind,
    #[default]
    Amount,
    Date,
    Category,
    Description,
}

impl TransactionField {
    /// Get the next field (for Tab navigation)
    pub fn next(self) -> Self {
        match self {
            Self::Kind => Self::Amount,
            Self::Amount => Self::Date,
            Self::Date => Self::Category,
            Self::Category => Self::Description,
            Self::Description => Self::Kind,
        }
    }

    /// Get the previous field (for Shift+Tab navigation)
    pub fn prev(self) -> Self {
        match self {
            Self::Kind => Self::Description,
            Self::Amount => Self::Kind,
            Self::Date => Self::Amount,
            Self::Category => Self::Date,
            Self::Description => Self::Category,
        }
    }
}

/// State for the transaction form dialog
#[derive(Debug, Clone)]
pub struct TransactionFormState {
    pub focused_field: TransactionField,
    pub kind: EntryKind,
    pub amount_input: TextInput,
    pub date_input: TextInput,
    pub category_id: Option<CategoryId>,
    pub description_input: TextInput,
    /// Set when editing an existing transaction
    pub editing: Option<TransactionId>,
    pub error_message: Option<String>,
}

impl TransactionFormState {
    /// Empty form dated `today`
    pub fn new(today: NaiveDate, kind: EntryKind) -> Self {
        let mut draft = TransactionDraft::dated(today);
        draft.kind = kind;
        Self::from_draft(draft, None)
    }

    /// Form pre-filled from an existing transaction
    pub fn from_transaction(txn: &Transaction) -> Self {
        Self::from_draft(TransactionDraft::from_transaction(txn), Some(txn.id))
    }

    fn from_draft(draft: TransactionDraft, editing: Option<TransactionId>) -> Self {
        Self {
            focused_field: TransactionField::default(),
            kind: draft.kind,
            amount_input: TextInput::new().placeholder("0.00").content(draft.amount),
            date_input: TextInput::new().placeholder("YYYY-MM-DD").content(draft.date),
            category_id: draft.category_id,
            description_input: TextInput::new()
                .placeholder("Optional note")
                .content(draft.description),
            editing,
            error_message: None,
        }
    }

    /// Raw form values, ready for validation
    pub fn to_draft(&self) -> TransactionDraft {
        TransactionDraft {
            kind: self.kind,
            amount: self.amount_input.value().to_string(),
            date: self.date_input.value().to_string(),
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

    /// The text input under focus, if the focused field is a text field
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            TransactionField::Amount => Some(&mut self.amount_input),
            TransactionField::Date => Some(&mut self.date_input),
            TransactionField::Description => Some(&mut self.description_input),
            TransactionField::Kind | TransactionField::Category => None,
        }
    }

    /// Switch between expense and income; the category no longer fits
    pub fn toggle_kind(&mut self) {
        self.kind = match self.kind {
            EntryKind::Expense => EntryKind::Income,
            EntryKind::Income => EntryKind::Expense,
        };
        self.category_id = None;
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Render the transaction dialog
pub fn render(frame: &mut Frame, app: &App) {
    let palette = app.palette();
    let form = &app.transaction_form;
    let area = centered_rect_fixed(64, 12, frame.area());

    frame.render_widget(Clear, area);

    let title = match (form.editing.is_some(), form.kind) {
        (true, _) => "Edit Transaction",
        (false, EntryKind::Expense) => "Add Expense",
        (false, EntryKind::Income) => "Add Income",
    };

    let category_name = form
        .category_id
        .and_then(|id| CategoryService::new(app.storage).get(id).ok().flatten())
        .map(|c| c.label())
        .unwrap_or_else(|| "(none)".to_string());

    let kind_label = match form.kind {
        EntryKind::Expense => "Expense",
        EntryKind::Income => "Income",
    };

    let focused = form.focused_field;
    let lines = vec![
        Line::from(""),
        selector_line("Kind", kind_label, focused == TransactionField::Kind, &palette),
        form.amount_input
            .line("Amount", focused == TransactionField::Amount, &palette),
        form.date_input
            .line("Date", focused == TransactionField::Date, &palette),
        selector_line(
            "Category",
            &category_name,
            focused == TransactionField::Category,
            &palette,
        ),
        form.description_input
            .line("Description", focused == TransactionField::Description, &palette),
        Line::from(""),
        error_line(form.error_message.as_deref(), &palette),
        Line::from(""),
        form_hints(&palette),
    ];

    let paragraph = Paragraph::new(lines).block(dialog_block(title, &palette));
    frame.render_widget(paragraph, area);
}

/// Handle key input for the transaction dialog
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_dialog(),

        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
            app.transaction_form.prev_field()
        }
        KeyCode::Tab | KeyCode::Down => app.transaction_form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.transaction_form.prev_field(),

        KeyCode::Enter => save_transaction(app),

        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
            if app.transaction_form.focused_field == TransactionField::Kind =>
        {
            app.transaction_form.toggle_kind();
        }

        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
            if app.transaction_form.focused_field == TransactionField::Category =>
        {
            let forward = key.code != KeyCode::Left;
            let categories = CategoryService::new(app.storage)
                .list(Some(app.transaction_form.kind))
                .unwrap_or_default();
            let form = &mut app.transaction_form;
            form.category_id = cycle_category(form.category_id, &categories, forward);
        }

        code => {
            let form = &mut app.transaction_form;
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

/// Validate and save the form, or show the first problem
fn save_transaction(app: &mut App) {
    let fields = match app.transaction_form.to_draft().validate() {
        Ok(fields) => fields,
        Err(e) => {
            app.transaction_form.set_error(e.to_string());
            return;
        }
    };

    let service = TransactionService::new(app.storage);
    let result = match app.transaction_form.editing {
        Some(id) => service.update(id, fields).map(|_| "Transaction updated"),
        None => service.create(fields).map(|txn| match txn.kind {
            EntryKind::Expense => "Expense recorded",
            EntryKind::Income => "Income recorded",
        }),
    };

    match result {
        Ok(message) => {
            app.close_dialog();
            app.set_status(message);
        }
        Err(e) => app.transaction_form.set_error(e.to_string()),
    }
}
