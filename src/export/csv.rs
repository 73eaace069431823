//! CSV export
//!
//! Spreadsheet-friendly dumps of transactions and future expenses.

use chrono::NaiveDate;
use std::io::Write;

use crate::error::{SetAsideError, SetAsideResult};
use crate::services::{CategoryService, FutureExpenseService};
use crate::storage::Storage;

fn export_err(e: csv::Error) -> SetAsideError {
    SetAsideError::Export(e.to_string())
}

/// Export all transactions, newest first
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: &mut W) -> SetAsideResult<()> {
    let categories = CategoryService::new(storage).lookup()?;
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["ID", "Date", "Kind", "Category", "Description", "Amount"])
        .map_err(export_err)?;

    for txn in storage.transactions.get_all()? {
        let category = txn
            .category_id
            .and_then(|id| categories.get(&id))
            .map(|c| c.name.clone())
            .unwrap_or_default();

        csv_writer
            .write_record([
                txn.id.to_string(),
                txn.date.to_string(),
                txn.kind.to_string(),
                category,
                txn.description.clone(),
                txn.signed_amount().to_string(),
            ])
            .map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| SetAsideError::Export(e.to_string()))?;
    Ok(())
}

/// Export future expenses with their daily set-aside as of `today`
pub fn export_future_expenses_csv<W: Write>(
    storage: &Storage,
    writer: &mut W,
    today: NaiveDate,
) -> SetAsideResult<()> {
    let categories = CategoryService::new(storage).lookup()?;
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "ID",
            "Name",
            "Category",
            "Amount",
            "Due Date",
            "Days Remaining",
            "Daily Amount",
        ])
        .map_err(export_err)?;

    for expense in FutureExpenseService::new(storage).list()? {
        let category = expense
            .category_id
            .and_then(|id| categories.get(&id))
            .map(|c| c.name.clone())
            .unwrap_or_default();

        csv_writer
            .write_record([
                expense.id.to_string(),
                expense.name.clone(),
                category,
                expense.amount.to_string(),
                expense.due_date.to_string(),
                expense.days_remaining(today).to_string(),
                expense.daily_amount(today).to_string(),
            ])
            .map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| SetAsideError::Export(e.to_string()))?;
    Ok(())
}
