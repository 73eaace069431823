//! Export module for SetAside
//!
//! - CSV: transactions and future expenses (spreadsheet-compatible)
//! - JSON: the whole store, machine-readable
//! - YAML: the whole store, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_future_expenses_csv, export_transactions_csv};
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
