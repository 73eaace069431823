//! SetAside - terminal budgeting that sets money aside for planned expenses
//!
//! This library provides the core functionality for the SetAside budgeting
//! application. From a monthly income, fixed expenses and a savings goal it
//! derives what can be spent each day. Planned future expenses reduce that
//! daily budget by the amount that has to be put aside per day to cover them
//! by their due date.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Diagnostic logging setup
//! - `models`: Core data models (transactions, categories, future expenses, forms)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `reports`: Monthly statistics and trends
//! - `export`: CSV, JSON and YAML export
//! - `display`: Plain-text formatting for the CLI
//! - `cli`: Command-line subcommands
//! - `tui`: Interactive terminal interface
//!
//! # Example
//!
//! ```rust,ignore
//! use setaside::config::{paths::SetAsidePaths, settings::Settings};
//! use setaside::services::BudgetService;
//! use setaside::storage::Storage;
//!
//! let paths = SetAsidePaths::new()?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let today = chrono::Local::now().date_naive();
//! let dashboard = BudgetService::new(&storage).dashboard(today)?;
//! println!("Spend today: {}", dashboard.remaining_today);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::SetAsideError;
