//! Budget setup CLI commands
//!
//! Monthly income, fixed expenses and savings, entered once and edited
//! whenever they change.

use clap::Subcommand;

use super::parse_amount;
use crate::config::settings::Settings;
use crate::display::profile::format_profile;
use crate::error::SetAsideResult;
use crate::services::ProfileService;
use crate::storage::Storage;

/// Setup subcommands
#[derive(Subcommand)]
pub enum SetupCommands {
    /// Show the monthly budget
    Show,

    /// Set the monthly income
    Income {
        /// Amount (e.g., "2500.00")
        amount: String,
    },

    /// Add a fixed monthly expense
    AddFixed {
        /// Expense name (e.g., "Rent")
        name: String,
        /// Monthly amount
        amount: String,
    },

    /// Remove a fixed monthly expense
    RemoveFixed {
        /// Expense name or ID
        expense: String,
    },

    /// Set the monthly savings goal
    Savings {
        /// Amount (e.g., "200.00")
        amount: String,
    },
}

/// Handle a setup command
pub fn handle_setup_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SetupCommands,
) -> SetAsideResult<()> {
    let service = ProfileService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        SetupCommands::Show => {
            let profile = service.show()?;
            print!("{}", format_profile(&profile, symbol));
        }

        SetupCommands::Income { amount } => {
            let profile = service.set_income(parse_amount(&amount)?)?;
            println!(
                "Monthly income set to {}",
                profile.monthly_income.format_with_symbol(symbol)
            );
            report_progress(&profile, symbol);
        }

        SetupCommands::AddFixed { name, amount } => {
            let expense = service.add_fixed_expense(&name, parse_amount(&amount)?)?;
            println!(
                "Added fixed expense: {} ({})",
                expense.name,
                expense.amount.format_with_symbol(symbol)
            );
            report_progress(&service.show()?, symbol);
        }

        SetupCommands::RemoveFixed { expense } => {
            let removed = service.remove_fixed_expense(&expense)?;
            println!("Removed fixed expense: {}", removed.name);
        }

        SetupCommands::Savings { amount } => {
            let profile = service.set_savings(parse_amount(&amount)?)?;
            println!(
                "Monthly savings set to {}",
                profile.monthly_savings.format_with_symbol(symbol)
            );
            report_progress(&profile, symbol);
        }
    }

    Ok(())
}

fn report_progress(profile: &crate::models::BudgetProfile, symbol: &str) {
    if profile.is_complete() {
        println!(
            "Disposable each month: {}",
            profile.disposable_monthly().format_with_symbol(symbol)
        );
    }
}
