//! Settings CLI commands

use clap::Subcommand;

use crate::config::paths::SetAsidePaths;
use crate::config::settings::{Settings, Theme};
use crate::error::SetAsideResult;
use crate::storage::Storage;

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show,

    /// Set the color theme
    Theme {
        /// light or dark
        theme: Theme,
    },

    /// Set the currency symbol shown next to amounts
    Currency {
        /// Symbol (e.g., "€", "$", "CHF")
        symbol: String,
    },

    /// Set how dates are shown (strftime, e.g. "%d/%m/%Y")
    DateFormat {
        format: String,
    },

    /// Delete all transactions, future expenses and the budget profile
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

/// Handle a settings command
pub fn handle_settings_command(
    storage: &Storage,
    paths: &SetAsidePaths,
    settings: &mut Settings,
    cmd: SettingsCommands,
) -> SetAsideResult<()> {
    match cmd {
        SettingsCommands::Show => {
            println!("Settings");
            println!("  Theme:          {}", settings.theme);
            println!("  Currency:       {}", settings.currency_symbol);
            println!("  Date format:    {}", settings.date_format);
            println!(
                "  Setup complete: {}",
                if settings.setup_completed { "Yes" } else { "No" }
            );
        }

        SettingsCommands::Theme { theme } => {
            settings.theme = theme;
            settings.save(paths)?;
            println!("Theme set to {}", theme);
        }

        SettingsCommands::Currency { symbol } => {
            settings.set_currency_symbol(&symbol)?;
            settings.save(paths)?;
            println!("Currency symbol set to {}", settings.currency_symbol);
        }

        SettingsCommands::DateFormat { format } => {
            settings.set_date_format(&format)?;
            settings.save(paths)?;
            println!("Date format set to {}", settings.date_format);
        }

        SettingsCommands::Reset { yes } => {
            if !yes {
                println!("This deletes all transactions, future expenses and the monthly budget.");
                println!("Categories are reset to the defaults. Settings are kept.");
                println!();
                println!("Run 'setaside settings reset --yes' to confirm.");
                return Ok(());
            }

            storage.reset()?;
            settings.setup_completed = false;
            settings.save(paths)?;
            println!("All data has been reset.");
        }
    }

    Ok(())
}
