//! Statistics CLI commands

use clap::Subcommand;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use super::{parse_month, today};
use crate::config::settings::Settings;
use crate::error::{SetAsideError, SetAsideResult};
use crate::reports::{MonthlyStats, MonthlyTrend, MAX_TREND_MONTHS};
use crate::storage::Storage;

/// Statistics subcommands
#[derive(Subcommand)]
pub enum StatsCommands {
    /// Income, expenses and spending per category for a month
    Month {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Also write the category breakdown to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Income and expenses over the last months
    Trend {
        /// Number of months, the current one included
        #[arg(
            short,
            long,
            default_value = "6",
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_TREND_MONTHS))
        )]
        months: u32,
    },
}

/// Handle a statistics command
pub fn handle_stats_command(
    storage: &Storage,
    settings: &Settings,
    cmd: StatsCommands,
) -> SetAsideResult<()> {
    let today = today();

    match cmd {
        StatsCommands::Month { month, csv } => {
            let stats = match month {
                Some(month) => {
                    let (year, month) = parse_month(&month)?;
                    MonthlyStats::generate(storage, year, month, today)?
                }
                None => MonthlyStats::current(storage, today)?,
            };

            print!("{}", stats.format_terminal(&settings.currency_symbol));

            if let Some(path) = csv {
                let file = File::create(&path).map_err(|e| {
                    SetAsideError::Export(format!(
                        "Failed to create file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                let mut writer = BufWriter::new(file);
                stats.export_csv(&mut writer)?;
                println!("\nCategory breakdown written to: {}", path.display());
            }
        }

        StatsCommands::Trend { months } => {
            let trend = MonthlyTrend::generate(storage, today, months)?;
            print!("{}", trend.format_terminal(&settings.currency_symbol));
        }
    }

    Ok(())
}
