//! TUI Views module
//!
//! The five views switched from the navigation bar (dashboard, history,
//! future expenses, stats, settings) plus the status bar.

pub mod dashboard;
pub mod future_expenses;
pub mod history;
pub mod navigation;
pub mod settings;
pub mod stats;
pub mod status_bar;

use ratatui::Frame;

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    navigation::render(frame, app, layout.nav);

    match app.active_view {
        ActiveView::Dashboard => dashboard::render(frame, app, layout.main),
        ActiveView::History => history::render(frame, app, layout.main),
        ActiveView::FutureExpenses => future_expenses::render(frame, app, layout.main),
        ActiveView::Stats => stats::render(frame, app, layout.main),
        ActiveView::Settings => settings::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &App) {
    match app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::Transaction => dialogs::transaction::render(frame, app),
        ActiveDialog::FutureExpense => dialogs::future_expense::render(frame, app),
        ActiveDialog::Profile => dialogs::profile::render(frame, app),
        ActiveDialog::Confirm(action) => dialogs::confirm::render(frame, app, action),
        ActiveDialog::None => {}
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::screen;
    use super::*;
    use crate::config::paths::SetAsidePaths;
    use crate::config::settings::Settings;
    use crate::models::EntryKind;
    use crate::storage::Storage;
    use crate::tui::app::ConfirmAction;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SetAsidePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_every_view_renders() {
        let (_temp_dir, storage) = create_test_storage();
        let mut settings = Settings::default();
        let mut app = App::new(&storage, &mut settings, today());

        for view in ActiveView::ALL {
            app.switch_view(view);
            let text = screen(&app);
            assert!(text.contains("Dashboard"), "nav bar missing in {:?}", view);
            assert!(text.contains(view.title()));
        }
    }

    #[test]
    fn test_dialogs_render_on_top() {
        let (_temp_dir, storage) = create_test_storage();
        let mut settings = Settings::default();
        let mut app = App::new(&storage, &mut settings, today());

        app.open_transaction_form(EntryKind::Expense, None);
        assert!(screen(&app).contains("Add Expense"));

        app.open_future_form(None);
        assert!(screen(&app).contains("Add Future Expense"));

        app.open_dialog(ActiveDialog::Confirm(ConfirmAction::ResetData));
        assert!(screen(&app).contains("Confirm"));

        app.open_dialog(ActiveDialog::Help);
        assert!(screen(&app).contains("Global Keys"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let (_temp_dir, storage) = create_test_storage();
        let mut settings = Settings::default();
        let mut app = App::new(&storage, &mut settings, today());
        app.open_future_form(None);

        for view in ActiveView::ALL {
            app.switch_view(view);
            let _ = test_support::render_rows(&app, 20, 6);
        }
    }
}
