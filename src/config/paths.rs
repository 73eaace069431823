//! Path management for SetAside
//!
//! ## Path Resolution Order
//!
//! 1. `SETASIDE_DATA_DIR` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (`~/.config/setaside` on Linux, `~/Library/Application Support/...` on
//!    macOS, `%APPDATA%\...` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::SetAsideError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "SETASIDE_DATA_DIR";

/// Manages all paths used by SetAside
#[derive(Debug, Clone)]
pub struct SetAsidePaths {
    base_dir: PathBuf,
}

impl SetAsidePaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, SetAsideError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the diagnostic log written while the TUI runs
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("setaside.log")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    pub fn future_expenses_file(&self) -> PathBuf {
        self.data_dir().join("future_expenses.json")
    }

    /// Get the path to profile.json (income, fixed expenses, savings)
    pub fn profile_file(&self) -> PathBuf {
        self.data_dir().join("profile.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), SetAsideError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SetAsideError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SetAsideError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if SetAside has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, SetAsideError> {
    ProjectDirs::from("", "", "setaside")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| SetAsideError::Config("Could not determine home directory".into()))
}
