//! Transaction CLI commands
//!
//! Implements CLI commands for the expense and income history.

use clap::Subcommand;

use super::{parse_month, resolve_category, today};
use crate::config::settings::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::{SetAsideError, SetAsideResult};
use crate::models::{EntryKind, TransactionDraft};
use crate::services::{CategoryService, TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an expense (or income with --income)
    Add {
        /// Amount (e.g., "12.50")
        amount: String,
        /// Record as income instead of an expense
        #[arg(short, long)]
        income: bool,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Month to show (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
        /// Filter by category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Filter by kind (expense, income)
        #[arg(short, long)]
        kind: Option<EntryKind>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Remove the category
        #[arg(long, conflicts_with = "category")]
        clear_category: bool,
        /// New kind (expense, income)
        #[arg(short, long)]
        kind: Option<EntryKind>,
        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> SetAsideResult<()> {
    let service = TransactionService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        TransactionCommands::Add {
            amount,
            income,
            category,
            date,
            description,
        } => {
            let mut draft = TransactionDraft::dated(today());
            draft.kind = if income {
                EntryKind::Income
            } else {
                EntryKind::Expense
            };
            draft.amount = amount;
            if let Some(date) = date {
                draft.date = date;
            }
            draft.category_id = resolve_category(storage, category.as_deref())?;
            draft.description = description.unwrap_or_default();

            let fields = draft
                .validate()
                .map_err(|e| SetAsideError::Validation(e.to_string()))?;
            let txn = service.create(fields)?;

            println!("Recorded {}:", txn.kind);
            println!("  ID:     {}", txn.id);
            println!("  Date:   {}", txn.date.format(&settings.date_format));
            println!("  Amount: {}", txn.amount.format_with_symbol(symbol));
        }

        TransactionCommands::List {
            month,
            category,
            kind,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);
            if let Some(month) = month {
                let (year, month) = parse_month(&month)?;
                filter = filter.month(year, month);
            }
            if let Some(id) = resolve_category(storage, category.as_deref())? {
                filter = filter.category(id);
            }
            if let Some(kind) = kind {
                filter = filter.kind(kind);
            }

            let transactions = service.list(filter)?;
            let categories = CategoryService::new(storage).lookup()?;
            print!(
                "{}",
                format_transaction_register(&transactions, &categories, settings)
            );
        }

        TransactionCommands::Show { id } => {
            let txn = service.resolve(&id)?;
            let category = match txn.category_id {
                Some(cat_id) => CategoryService::new(storage).get(cat_id)?,
                None => None,
            };
            print!(
                "{}",
                format_transaction_details(&txn, category.as_ref(), settings)
            );
        }

        TransactionCommands::Edit {
            id,
            amount,
            date,
            category,
            clear_category,
            kind,
            description,
        } => {
            let txn = service.resolve(&id)?;

            if amount.is_none()
                && date.is_none()
                && category.is_none()
                && !clear_category
                && kind.is_none()
                && description.is_none()
            {
                println!("No changes specified. Use --amount, --date, --category, --kind or --description.");
                return Ok(());
            }

            let mut draft = TransactionDraft::from_transaction(&txn);
            if let Some(amount) = amount {
                draft.amount = amount;
            }
            if let Some(date) = date {
                draft.date = date;
            }
            if let Some(kind) = kind {
                draft.kind = kind;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if clear_category {
                draft.category_id = None;
            } else if category.is_some() {
                draft.category_id = resolve_category(storage, category.as_deref())?;
            }

            let fields = draft
                .validate()
                .map_err(|e| SetAsideError::Validation(e.to_string()))?;
            let updated = service.update(txn.id, fields)?;
            println!("Updated transaction: {}", updated.id);
        }

        TransactionCommands::Delete { id } => {
            let txn = service.resolve(&id)?;
            service.delete(txn.id)?;
            println!(
                "Deleted {} of {} on {}",
                txn.kind,
                txn.amount.format_with_symbol(symbol),
                txn.date.format(&settings.date_format)
            );
        }
    }

    Ok(())
}
