//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.

use chrono::NaiveDate;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::error::{SetAsideError, SetAsideResult};
use crate::export::export_full_json;
use crate::models::{
    EntryKind, FixedExpenseId, FutureExpense, FutureExpenseId, Transaction, TransactionId,
};
use crate::services::{
    FutureExpenseService, ProfileService, TransactionFilter, TransactionService,
};
use crate::storage::Storage;

use super::dialogs::future_expense::FutureExpenseFormState;
use super::dialogs::profile::{ProfileFormKind, ProfileFormState};
use super::dialogs::transaction::TransactionFormState;
use super::theme::Palette;

/// Currency symbols offered by the settings view
pub const CURRENCY_CHOICES: [&str; 5] = ["€", "$", "£", "¥", "CHF"];

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Dashboard,
    History,
    FutureExpenses,
    Stats,
    Settings,
}

impl ActiveView {
    /// All views in navigation order
    pub const ALL: [ActiveView; 5] = [
        Self::Dashboard,
        Self::History,
        Self::FutureExpenses,
        Self::Stats,
        Self::Settings,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::Dashboard => 0,
            Self::History => 1,
            Self::FutureExpenses => 2,
            Self::Stats => 3,
            Self::Settings => 4,
        }
    }

    /// View for a 1-based number key
    pub fn from_key(key: char) -> Option<Self> {
        key.to_digit(10)
            .and_then(|d| (d as usize).checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::History => "History",
            Self::FutureExpenses => "Future",
            Self::Stats => "Stats",
            Self::Settings => "Settings",
        }
    }
}

/// Destructive actions that need a yes/no answer first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteTransaction(TransactionId),
    DeleteFutureExpense(FutureExpenseId),
    RemoveFixedExpense(FixedExpenseId),
    ResetData,
}

impl ConfirmAction {
    pub fn message(&self) -> &'static str {
        match self {
            Self::DeleteTransaction(_) => "Delete this transaction?",
            Self::DeleteFutureExpense(_) => "Delete this future expense?",
            Self::RemoveFixedExpense(_) => "Remove this fixed expense?",
            Self::ResetData => "Delete all transactions, future expenses and the budget?",
        }
    }
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    Transaction,
    FutureExpense,
    Profile,
    Confirm(ConfirmAction),
}

/// Main application state
pub struct App<'a> {
    /// The storage layer
    pub storage: &'a Storage,

    /// Application settings, saved when changed from the settings view
    pub settings: &'a mut Settings,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Currently active view
    pub active_view: ActiveView,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// The day budgets are computed for
    pub today: NaiveDate,

    /// Selected row in the history view
    pub selected_transaction_index: usize,

    /// Selected row in the future expenses view
    pub selected_future_index: usize,

    /// Selected row in the settings view
    pub selected_setting_index: usize,

    /// Status message to display
    pub status_message: Option<String>,

    pub transaction_form: TransactionFormState,

    pub future_form: FutureExpenseFormState,

    pub profile_form: ProfileFormState,
}

impl<'a> App<'a> {
    /// Create a new App instance
    pub fn new(storage: &'a Storage, settings: &'a mut Settings, today: NaiveDate) -> Self {
        Self {
            storage,
            settings,
            should_quit: false,
            active_view: ActiveView::default(),
            active_dialog: ActiveDialog::default(),
            today,
            selected_transaction_index: 0,
            selected_future_index: 0,
            selected_setting_index: 0,
            status_message: None,
            transaction_form: TransactionFormState::new(today, EntryKind::Expense),
            future_form: FutureExpenseFormState::new(today),
            profile_form: ProfileFormState::new(ProfileFormKind::Income),
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.settings.theme)
    }

    pub fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Switch to a different view
    pub fn switch_view(&mut self, view: ActiveView) {
        if self.active_view != view {
            self.active_view = view;
            self.clear_status();
        }
    }

    pub fn next_view(&mut self) {
        self.switch_view(self.active_view.next());
    }

    pub fn prev_view(&mut self) {
        self.switch_view(self.active_view.prev());
    }

    /// Open a dialog
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.active_dialog = dialog;
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    fn selection_mut(&mut self) -> Option<&mut usize> {
        match self.active_view {
            ActiveView::History => Some(&mut self.selected_transaction_index),
            ActiveView::FutureExpenses => Some(&mut self.selected_future_index),
            ActiveView::Settings => Some(&mut self.selected_setting_index),
            ActiveView::Dashboard | ActiveView::Stats => None,
        }
    }

    /// Move selection up in the current view
    pub fn move_up(&mut self) {
        if let Some(index) = self.selection_mut() {
            *index = index.saturating_sub(1);
        }
    }

    /// Move selection down in the current view
    pub fn move_down(&mut self, max: usize) {
        if let Some(index) = self.selection_mut() {
            if *index < max.saturating_sub(1) {
                *index += 1;
            }
        }
    }

    /// Transactions for the history view, newest first
    pub fn transactions(&self) -> Vec<Transaction> {
        TransactionService::new(self.storage)
            .list(TransactionFilter::new())
            .unwrap_or_default()
    }

    /// Future expenses, nearest due date first
    pub fn future_expenses(&self) -> Vec<FutureExpense> {
        FutureExpenseService::new(self.storage)
            .list()
            .unwrap_or_default()
    }

    pub fn selected_transaction(&self) -> Option<Transaction> {
        self.transactions()
            .into_iter()
            .nth(self.selected_transaction_index)
    }

    pub fn selected_future_expense(&self) -> Option<FutureExpense> {
        self.future_expenses()
            .into_iter()
            .nth(self.selected_future_index)
    }

    /// Open the transaction form, empty or for an existing record
    pub fn open_transaction_form(&mut self, kind: EntryKind, existing: Option<&Transaction>) {
        self.transaction_form = match existing {
            Some(txn) => TransactionFormState::from_transaction(txn),
            None => TransactionFormState::new(self.today, kind),
        };
        self.open_dialog(ActiveDialog::Transaction);
    }

    /// Open the future expense form, empty or for an existing record
    pub fn open_future_form(&mut self, existing: Option<&FutureExpense>) {
        self.future_form = match existing {
            Some(expense) => FutureExpenseFormState::from_expense(expense),
            None => FutureExpenseFormState::new(self.today),
        };
        self.open_dialog(ActiveDialog::FutureExpense);
    }

    /// Open the income, savings or fixed expense form
    pub fn open_profile_form(&mut self, kind: ProfileFormKind) {
        let profile = self.storage.profile.get().unwrap_or_default();
        self.profile_form = ProfileFormState::new(kind);
        match kind {
            ProfileFormKind::Income if profile.income_set => {
                self.profile_form.amount_input.set(profile.monthly_income.to_string());
            }
            ProfileFormKind::Savings if profile.savings_set => {
                self.profile_form.amount_input.set(profile.monthly_savings.to_string());
            }
            _ => {}
        }
        self.open_dialog(ActiveDialog::Profile);
    }

    /// Keep the in-memory setup flag in line with the profile on disk
    pub fn sync_setup_flag(&mut self) {
        if let Ok(profile) = self.storage.profile.get() {
            self.settings.setup_completed = profile.is_complete();
        }
    }

    /// Switch between light and dark and save the choice
    pub fn toggle_theme(&mut self) -> SetAsideResult<()> {
        self.settings.theme = self.settings.theme.toggled();
        self.settings.save(self.storage.paths())?;
        self.set_status(format!("Theme: {}", self.settings.theme));
        Ok(())
    }

    /// Move to the next currency symbol and save it
    pub fn cycle_currency(&mut self) -> SetAsideResult<()> {
        let next = CURRENCY_CHOICES
            .iter()
            .position(|c| *c == self.settings.currency_symbol)
            .map(|i| CURRENCY_CHOICES[(i + 1) % CURRENCY_CHOICES.len()])
            .unwrap_or(CURRENCY_CHOICES[0]);

        self.settings.set_currency_symbol(next)?;
        self.settings.save(self.storage.paths())?;
        self.set_status(format!("Currency: {}", next));
        Ok(())
    }

    /// Write a full JSON export next to the data directory
    pub fn export_data(&mut self) -> SetAsideResult<PathBuf> {
        let path = self
            .storage
            .paths()
            .base_dir()
            .join(format!("setaside-export-{}.json", self.today.format("%Y-%m-%d")));

        let file = File::create(&path).map_err(|e| {
            SetAsideError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        export_full_json(self.storage, &mut writer, true)?;

        self.set_status(format!("Exported to {}", path.display()));
        Ok(path)
    }

    /// Carry out a confirmed action
    pub fn confirm(&mut self, action: ConfirmAction) -> SetAsideResult<()> {
        match action {
            ConfirmAction::DeleteTransaction(id) => {
                TransactionService::new(self.storage).delete(id)?;
                self.selected_transaction_index = self.selected_transaction_index.saturating_sub(1);
                self.set_status("Transaction deleted");
            }
            ConfirmAction::DeleteFutureExpense(id) => {
                let expense = FutureExpenseService::new(self.storage).delete(id)?;
                self.selected_future_index = self.selected_future_index.saturating_sub(1);
                self.set_status(format!("Deleted {}", expense.name));
            }
            ConfirmAction::RemoveFixedExpense(id) => {
                let removed =
                    ProfileService::new(self.storage).remove_fixed_expense(&id.as_uuid().to_string())?;
                self.sync_setup_flag();
                self.set_status(format!("Removed {}", removed.name));
            }
            ConfirmAction::ResetData => {
                self.storage.reset()?;
                self.settings.setup_completed = false;
                self.settings.save(self.storage.paths())?;
                self.selected_transaction_index = 0;
                self.selected_future_index = 0;
                self.selected_setting_index = 0;
                self.set_status("All data has been reset");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SetAsidePaths;
    use crate::config::settings::Theme;
    use crate::models::{FutureExpenseFields, Money};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SetAsidePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(ActiveView::Dashboard.next(), ActiveView::History);
        assert_eq!(ActiveView::Settings.next(), ActiveView::Dashboard);
        assert_eq!(ActiveView::Dashboard.prev(), ActiveView::Settings);
        for view in ActiveView::ALL {
            assert_eq!(ActiveView::ALL[view.index()], view);
        }
    }

    #[test]
    fn test_view_from_key() {
        assert_eq!(ActiveView::from_key('1'), Some(ActiveView::Dashboard));
        assert_eq!(ActiveView::from_key('5'), Some(ActiveView::Settings));
        assert_eq!(ActiveView::from_key('0'), None);
        assert_eq!(ActiveView::from_key('6'), None);
        assert_eq!(ActiveView::from_key('x'), None);
    }

    #[test]
    fn test_toggle_theme_persists() {
        let (_temp_dir, storage) = create_test_storage();
        let mut settings = Settings::default();
        let mut app = App::new(&storage, &mut settings, today());

        app.toggle_theme().unwrap();
        assert_eq!(app.settings.theme, Theme::Light);

        let saved = Settings::load_or_create(storage.paths()).unwrap();
        assert_eq!(saved.theme, Theme::Light);
    }

    #[test]
    fn test_cycle_currency() {
        let (_temp_dir, storage) = create_test_storage();
        let mut settings = Settings::default();
        let mut app = App::new(&storage, &mut settings, today());

        app.cycle_currency().unwrap();
        assert_eq!(app.symbol(), "$");

        app.settings.currency_symbol = "kr".into();
        app.cycle_currency().unwrap();
        assert_eq!(app.symbol(), "€");
    }

    #[test]
    fn test_confirm_delete_future_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let expense = FutureExpenseService::new(&storage)
            .create(FutureExpenseFields {
                name: "Dentist".into(),
                amount: Money::from_cents(9000),
                due_date: NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(),
                category_id: None,
                description: String::new(),
            })
            .unwrap();

        let mut settings = Settings::default();
        let mut app = App::new(&storage, &mut settings, today());
        app.confirm(ConfirmAction::DeleteFutureExpense(expense.id))
            .unwrap();

        assert!(app.future_expenses().is_empty());
        assert_eq!(app.status_message.as_deref(), Some("Deleted Dentist"));
    }

    #[test]
    fn test_export_data() {
        let (_temp_dir, storage) = create_test_storage();
        let mut settings = Settings::default();
        let mut app = App::new(&storage, &mut settings, today());

        let path = app.export_data().unwrap();
        assert!(path.ends_with("setaside-export-2025-05-01.json"));
        assert!(path.exists());
    }

    #[test]
    fn test_move_selection_bounds() {
        let (_temp_dir, storage) = create_test_storage();
        let mut settings = Settings::default();
        let mut app = App::new(&storage, &mut settings, today());

        app.switch_view(ActiveView::History);
        app.move_up();
        assert_eq!(app.selected_transaction_index, 0);
        app.move_down(2);
        app.move_down(2);
        assert_eq!(app.selected_transaction_index, 1);
    }
}
