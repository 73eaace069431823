//! CLI commands for data export

use clap::{Subcommand, ValueEnum};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use super::today;
use crate::error::{SetAsideError, SetAsideResult};
use crate::export::{csv, json, yaml};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (transactions only)
    Csv,
    /// JSON format (everything)
    Json,
    /// YAML format (everything, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all data to a file
    All {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export transactions to CSV
    Transactions {
        /// Output file path
        output: PathBuf,
    },

    /// Export future expenses to CSV
    Future {
        /// Output file path
        output: PathBuf,
    },

    /// Show what an export would contain without writing files
    Info,
}

fn create_output(path: &Path) -> SetAsideResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        SetAsideError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> SetAsideResult<()> {
    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => {
            let mut writer = create_output(&output)?;
            match format {
                ExportFormat::Csv => {
                    csv::export_transactions_csv(storage, &mut writer)?;
                    println!("Transactions exported to: {}", output.display());
                    println!("Note: CSV exports transactions only. Use JSON or YAML for everything.");
                }
                ExportFormat::Json => {
                    json::export_full_json(storage, &mut writer, pretty)?;
                    println!("All data exported to: {}", output.display());
                }
                ExportFormat::Yaml => {
                    yaml::export_full_yaml(storage, &mut writer)?;
                    println!("All data exported to: {}", output.display());
                }
            }
        }

        ExportCommands::Transactions { output } => {
            let mut writer = create_output(&output)?;
            csv::export_transactions_csv(storage, &mut writer)?;
            println!(
                "Exported {} transactions to: {}",
                storage.transactions.count()?,
                output.display()
            );
        }

        ExportCommands::Future { output } => {
            let mut writer = create_output(&output)?;
            csv::export_future_expenses_csv(storage, &mut writer, today())?;
            println!(
                "Exported {} future expenses to: {}",
                storage.future_expenses.count()?,
                output.display()
            );
        }

        ExportCommands::Info => {
            let export = json::FullExport::from_storage(storage)?;
            let meta = &export.metadata;

            println!("Export Information");
            println!("==================");
            println!("Schema version:  {}", export.schema_version);
            println!("Transactions:    {}", meta.transaction_count);
            println!("Categories:      {}", meta.category_count);
            println!("Future expenses: {}", meta.future_expense_count);
            println!(
                "Fixed expenses:  {}",
                export.profile.fixed_expenses.len()
            );
            if let (Some(earliest), Some(latest)) =
                (&meta.earliest_transaction, &meta.latest_transaction)
            {
                println!("Date range:      {} to {}", earliest, latest);
            }
        }
    }

    Ok(())
}
