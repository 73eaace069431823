//! Configuration module for SetAside
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence (theme, currency, date format)

pub mod paths;
pub mod settings;

pub use paths::SetAsidePaths;
pub use settings::{Settings, Theme};
