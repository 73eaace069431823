//! Future expense CLI commands

use clap::Subcommand;

use super::{resolve_category, today};
use crate::config::settings::Settings;
use crate::display::future_expense::{format_future_expense_details, format_future_expense_list};
use crate::error::{SetAsideError, SetAsideResult};
use crate::models::future_expense::default_due_date;
use crate::models::FutureExpenseDraft;
use crate::services::{CategoryService, FutureExpenseService};
use crate::storage::Storage;

/// Future expense subcommands
#[derive(Subcommand)]
pub enum FutureCommands {
    /// Plan a future expense
    Add {
        /// Expense name
        name: String,
        /// Amount due (e.g., "480.00")
        amount: String,
        /// Due date (YYYY-MM-DD), defaults to one month from today
        #[arg(short, long)]
        due: Option<String>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// List planned expenses with their daily set-aside
    List,
    /// Show one planned expense
    Show {
        /// Expense name or ID
        expense: String,
    },
    /// Edit a planned expense
    Edit {
        /// Expense name or ID
        expense: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New due date
        #[arg(short, long)]
        due: Option<String>,
        /// New category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Remove the category
        #[arg(long, conflicts_with = "category")]
        clear_category: bool,
        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// Delete a planned expense
    Delete {
        /// Expense name or ID
        expense: String,
    },
}

/// Handle a future expense command
pub fn handle_future_command(
    storage: &Storage,
    settings: &Settings,
    cmd: FutureCommands,
) -> SetAsideResult<()> {
    let service = FutureExpenseService::new(storage);
    let symbol = &settings.currency_symbol;
    let today = today();

    match cmd {
        FutureCommands::Add {
            name,
            amount,
            due,
            category,
            description,
        } => {
            let mut draft = FutureExpenseDraft::with_due_date(default_due_date(today));
            draft.name = name;
            draft.amount = amount;
            if let Some(due) = due {
                draft.due_date = due;
            }
            draft.category_id = resolve_category(storage, category.as_deref())?;
            draft.description = description.unwrap_or_default();

            let fields = draft
                .validate()
                .map_err(|e| SetAsideError::Validation(e.to_string()))?;
            let expense = service.create(fields)?;

            println!("Planned future expense: {}", expense.name);
            println!("  ID:      {}", expense.id);
            println!("  Amount:  {}", expense.amount.format_with_symbol(symbol));
            println!("  Due:     {}", expense.due_date.format(&settings.date_format));
            println!(
                "  Per day: {}",
                expense.daily_amount(today).format_with_symbol(symbol)
            );
        }

        FutureCommands::List => {
            let expenses = service.list()?;
            let summary = service.summary(today)?;
            print!(
                "{}",
                format_future_expense_list(&expenses, &summary, today, settings)
            );
        }

        FutureCommands::Show { expense } => {
            let expense = service.resolve(&expense)?;
            let categories = CategoryService::new(storage).lookup()?;
            print!(
                "{}",
                format_future_expense_details(&expense, &categories, today, settings)
            );
        }

        FutureCommands::Edit {
            expense,
            name,
            amount,
            due,
            category,
            clear_category,
            description,
        } => {
            let expense = service.resolve(&expense)?;

            if name.is_none()
                && amount.is_none()
                && due.is_none()
                && category.is_none()
                && !clear_category
                && description.is_none()
            {
                println!("No changes specified. Use --name, --amount, --due, --category or --description.");
                return Ok(());
            }

            let mut draft = FutureExpenseDraft::from_expense(&expense);
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(amount) = amount {
                draft.amount = amount;
            }
            if let Some(due) = due {
                draft.due_date = due;
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
            let updated = service.update(expense.id, fields)?;
            println!(
                "Updated future expense: {} ({} per day)",
                updated.name,
                updated.daily_amount(today).format_with_symbol(symbol)
            );
        }

        FutureCommands::Delete { expense } => {
            let expense = service.resolve(&expense)?;
            service.delete(expense.id)?;
            println!("Deleted future expense: {}", expense.name);
        }
    }

    Ok(())
}
