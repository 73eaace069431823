use anyhow::Result;
use clap::{Parser, Subcommand};

use setaside::cli::{
    handle_audit_command, handle_category_command, handle_export_command, handle_future_command,
    handle_settings_command, handle_setup_command, handle_stats_command,
    handle_transaction_command,
};
use setaside::config::{paths::SetAsidePaths, settings::Settings};
use setaside::display::format_dashboard;
use setaside::logging::{init_logging, Verbosity};
use setaside::services::BudgetService;
use setaside::storage::Storage;

#[derive(Parser)]
#[command(
    name = "setaside",
    version,
    about = "Terminal budgeting that sets money aside for planned expenses",
    long_about = "SetAside tells you how much you can spend today. It starts from your \
                  monthly income, fixed expenses and savings, and puts aside a little \
                  every day for the expenses you plan ahead."
)]
struct Cli {
    /// More diagnostic output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Initialize the data directory with default categories
    Init,

    /// Show current configuration and paths
    Config,

    /// Show today's budget
    Dashboard,

    /// Expense and income history
    #[command(subcommand, alias = "txn")]
    Transaction(setaside::cli::TransactionCommands),

    /// Planned future expenses
    #[command(subcommand)]
    Future(setaside::cli::FutureCommands),

    /// Category management
    #[command(subcommand)]
    Category(setaside::cli::CategoryCommands),

    /// Monthly income, fixed expenses and savings
    #[command(subcommand)]
    Setup(setaside::cli::SetupCommands),

    /// Spending statistics
    #[command(subcommand)]
    Stats(setaside::cli::StatsCommands),

    /// Theme, currency and data reset
    #[command(subcommand)]
    Settings(setaside::cli::SettingsCommands),

    /// Export data
    #[command(subcommand)]
    Export(setaside::cli::ExportCommands),

    /// Show the history of changes
    Audit(setaside::cli::AuditArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);

    // Initialize paths and settings
    let paths = SetAsidePaths::new()?;

    // The TUI owns the terminal, so its diagnostics go to a file
    if matches!(cli.command, Some(Commands::Tui)) {
        paths.ensure_directories()?;
        init_logging(verbosity, Some(&paths.log_file()));
    } else {
        init_logging(verbosity, None);
    }

    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Tui) => {
            if !storage.is_initialized() {
                setaside::storage::init::initialize_storage(&paths)?;
                storage.load_all()?;
            }
            setaside::tui::run_tui(&storage, &mut settings)?;
        }
        Some(Commands::Init) => {
            println!("Initializing SetAside at: {}", paths.base_dir().display());
            setaside::storage::init::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Default categories have been created:");
            println!("  - Expense: Food, Transport, Home, Bills, Health, Entertainment, Shopping, Other");
            println!("  - Income:  Salary, Other Income");
            println!();
            println!("Next, enter your monthly budget:");
            println!("  setaside setup income 2500");
            println!("  setaside setup add-fixed Rent 900");
            println!("  setaside setup savings 200");
        }
        Some(Commands::Config) => {
            println!("SetAside Configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!("Log file:       {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!("  Theme:    {}", settings.theme);
            println!("  Currency: {}", settings.currency_symbol);
        }
        Some(Commands::Dashboard) => {
            let today = chrono::Local::now().date_naive();
            let summary = BudgetService::new(&storage).dashboard(today)?;
            print!("{}", format_dashboard(&summary, &settings));
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Future(cmd)) => {
            handle_future_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Setup(cmd)) => {
            handle_setup_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Stats(cmd)) => {
            handle_stats_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Settings(cmd)) => {
            handle_settings_command(&storage, &paths, &mut settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, cmd)?;
        }
        Some(Commands::Audit(args)) => {
            handle_audit_command(&storage, args)?;
        }
        None => {
            println!("SetAside - know what you can spend today");
            println!();
            println!("Run 'setaside --help' for usage information.");
            println!("Run 'setaside tui' to launch the interactive interface.");
        }
    }

    Ok(())
}
