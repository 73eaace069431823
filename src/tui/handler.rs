//! Event handler for the TUI
//!
//! Routes keyboard events to the open dialog, the global keys, or the
//! active view.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{ActiveDialog, ActiveView, App, ConfirmAction};
use super::dialogs;
use super::dialogs::profile::ProfileFormKind;
use super::event::Event;
use super::views::settings::{selected_item, settings_items, SettingsItem};
use crate::models::EntryKind;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick | Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    // Windows reports releases too
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    if app.has_dialog() {
        handle_dialog_key(app, key);
        return Ok(());
    }

    handle_normal_key(app, key)
}

/// Send the key to the open dialog
fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match app.active_dialog {
        ActiveDialog::Help => app.close_dialog(),
        ActiveDialog::Transaction => dialogs::transaction::handle_key(app, key),
        ActiveDialog::FutureExpense => dialogs::future_expense::handle_key(app, key),
        ActiveDialog::Profile => dialogs::profile::handle_key(app, key),
        ActiveDialog::Confirm(action) => dialogs::confirm::handle_key(app, key, action),
        ActiveDialog::None => {}
    }
}

/// Handle keys when no dialog is open
fn handle_normal_key(app: &mut App, key: KeyEvent) -> Result<()> {
    // Global keys (work everywhere)
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.quit();
            return Ok(());
        }
        KeyCode::Char('?') => {
            app.open_dialog(ActiveDialog::Help);
            return Ok(());
        }
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(view) = ActiveView::from_key(c) {
                app.switch_view(view);
            }
            return Ok(());
        }
        KeyCode::Tab | KeyCode::Right => {
            app.next_view();
            return Ok(());
        }
        KeyCode::BackTab | KeyCode::Left => {
            app.prev_view();
            return Ok(());
        }
        KeyCode::Char('a') => {
            app.open_transaction_form(EntryKind::Expense, None);
            return Ok(());
        }
        _ => {}
    }

    match app.active_view {
        ActiveView::Dashboard => handle_dashboard_key(app, key),
        ActiveView::History => handle_history_key(app, key),
        ActiveView::FutureExpenses => handle_future_key(app, key),
        ActiveView::Stats => {}
        ActiveView::Settings => handle_settings_key(app, key),
    }
    Ok(())
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('i') => app.open_transaction_form(EntryKind::Income, None),
        KeyCode::Char('f') => app.open_future_form(None),
        _ => {}
    }
}

fn handle_history_key(app: &mut App, key: KeyEvent) {
    let count = app.transactions().len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_down(count),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('i') => app.open_transaction_form(EntryKind::Income, None),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(txn) = app.selected_transaction() {
                app.open_transaction_form(txn.kind, Some(&txn));
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(txn) = app.selected_transaction() {
                app.open_dialog(ActiveDialog::Confirm(ConfirmAction::DeleteTransaction(
                    txn.id,
                )));
            }
        }
        _ => {}
    }
}

fn handle_future_key(app: &mut App, key: KeyEvent) {
    let count = app.future_expenses().len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_down(count),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('n') | KeyCode::Char('f') => app.open_future_form(None),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(expense) = app.selected_future_expense() {
                app.open_future_form(Some(&expense));
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(expense) = app.selected_future_expense() {
                app.open_dialog(ActiveDialog::Confirm(ConfirmAction::DeleteFutureExpense(
                    expense.id,
                )));
            }
        }
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    let count = app
        .storage
        .profile
        .get()
        .map(|profile| settings_items(&profile).len())
        .unwrap_or(0);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_down(count),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Enter | KeyCode::Char(' ') => activate_setting(app),
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(SettingsItem::FixedExpense(id)) = selected_item(app) {
                app.open_dialog(ActiveDialog::Confirm(ConfirmAction::RemoveFixedExpense(id)));
            }
        }
        _ => {}
    }
}

/// Act on the selected settings row
fn activate_setting(app: &mut App) {
    let Some(item) = selected_item(app) else {
        return;
    };

    let result = match item {
        SettingsItem::Theme => app.toggle_theme(),
        SettingsItem::Currency => app.cycle_currency(),
        SettingsItem::Income => {
            app.open_profile_form(ProfileFormKind::Income);
            Ok(())
        }
        SettingsItem::Savings => {
            app.open_profile_form(ProfileFormKind::Savings);
            Ok(())
        }
        SettingsItem::FixedExpense(_) => {
            app.set_status("Press 'd' to remove this fixed expense");
            Ok(())
        }
        SettingsItem::AddFixedExpense => {
            app.open_profile_form(ProfileFormKind::FixedExpense);
            Ok(())
        }
        SettingsItem::Export => app.export_data().map(|_| ()),
        SettingsItem::Reset => {
            app.open_dialog(ActiveDialog::Confirm(ConfirmAction::ResetData));
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::warn!(error = %e, "settings action failed");
        app.set_status(format!("Error: {}", e));
    }
}
