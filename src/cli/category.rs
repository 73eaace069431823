//! Category CLI commands

use clap::Subcommand;

use crate::display::category::{format_category_details, format_category_list};
use crate::error::SetAsideResult;
use crate::models::EntryKind;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories
    List {
        /// Only show one kind (expense, income)
        #[arg(short, long)]
        kind: Option<EntryKind>,
    },

    /// Create a new category
    Create {
        /// Category name
        name: String,
        /// Kind of category (expense, income)
        #[arg(short, long, default_value = "expense")]
        kind: EntryKind,
        /// Short icon shown before the name
        #[arg(short, long)]
        icon: Option<String>,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Rename a category or change its icon
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New icon (empty string removes it)
        #[arg(short, long)]
        icon: Option<String>,
    },

    /// Delete a category
    Delete {
        /// Category name or ID
        category: String,
        /// Delete even when transactions or future expenses use it
        #[arg(long)]
        force: bool,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> SetAsideResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { kind } => {
            let categories = service.list(kind)?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Create { name, kind, icon } => {
            let category = service.create(&name, kind, icon.as_deref())?;
            println!("Created {} category: {}", category.kind, category.label());
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Show { category } => {
            let category = service.resolve(&category)?;
            let usage = service.usage(category.id)?;
            print!("{}", format_category_details(&category, &usage));
        }

        CategoryCommands::Edit {
            category,
            name,
            icon,
        } => {
            let category = service.resolve(&category)?;

            if name.is_none() && icon.is_none() {
                println!("No changes specified. Use --name or --icon.");
                return Ok(());
            }

            let updated = service.update(category.id, name.as_deref(), icon.as_deref())?;
            println!("Updated category: {}", updated.label());
        }

        CategoryCommands::Delete { category, force } => {
            let category = service.resolve(&category)?;
            let usage = service.usage(category.id)?;

            service.delete(category.id, force)?;
            println!("Deleted category: {}", category.name);
            if usage.is_used() {
                println!(
                    "  Cleared from {} transactions and {} future expenses",
                    usage.transactions, usage.future_expenses
                );
            }
        }
    }

    Ok(())
}
