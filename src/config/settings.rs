//! User settings for SetAside
//!
//! Manages user preferences: colour theme, currency symbol, date format and
//! whether the budget profile setup has been completed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::str::FromStr;

use super::paths::SetAsidePaths;
use crate::error::SetAsideError;

/// Colour theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = SetAsideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(SetAsideError::Validation(format!(
                "Unknown theme '{}': expected 'light' or 'dark'",
                other
            ))),
        }
    }
}

/// User settings for SetAside
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub theme: Theme,

    /// Currency symbol used when displaying amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Whether income, fixed expenses and savings have all been entered
    #[serde(default)]
    pub setup_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "€".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

/// Whether `format` can render a calendar date
///
/// chrono panics on `to_string()` for unknown specifiers and for time fields
/// on a `NaiveDate`, so formats are checked before they are used.
pub fn is_valid_date_format(format: &str) -> bool {
    let Some(sample) = NaiveDate::from_ymd_opt(2025, 1, 31) else {
        return false;
    };
    let mut out = String::new();
    !format.trim().is_empty() && write!(out, "{}", sample.format(format)).is_ok()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            theme: Theme::default(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            setup_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &SetAsidePaths) -> Result<Self, SetAsideError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| SetAsideError::Io(format!("Failed to read settings file: {}", e)))?;

        let mut settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| SetAsideError::Config(format!("Failed to parse settings file: {}", e)))?;

        if !is_valid_date_format(&settings.date_format) {
            tracing::warn!(
                format = %settings.date_format,
                "invalid date format in settings, using the default"
            );
            settings.date_format = default_date_format();
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SetAsidePaths) -> Result<(), SetAsideError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SetAsideError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SetAsideError::Io(format!("Failed to write settings file: {}", e)))?;

        tracing::debug!(theme = %self.theme, "settings saved");
        Ok(())
    }

    /// Set the currency symbol
    pub fn set_currency_symbol(&mut self, symbol: &str) -> Result<(), SetAsideError> {
        let symbol = symbol.trim();
        if symbol.is_empty() || symbol.chars().count() > 4 {
            return Err(SetAsideError::Validation(
                "Currency symbol must be 1 to 4 characters".into(),
            ));
        }
        self.currency_symbol = symbol.to_string();
        Ok(())
    }

    /// Set the strftime format used to show dates
    pub fn set_date_format(&mut self, format: &str) -> Result<(), SetAsideError> {
        if !is_valid_date_format(format) {
            return Err(SetAsideError::Validation(format!(
                "Invalid date format '{}'. Use strftime date fields such as %d/%m/%Y",
                format
            )));
        }
        self.date_format = format.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert!(!settings.setup_completed);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SetAsidePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.theme = Theme::Dark;
        settings.set_currency_symbol("$").unwrap();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.theme, Theme::Dark);
        assert_eq!(loaded.currency_symbol, "$");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"theme": "dark"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_invalid_date_format_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SetAsidePaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        for bad in ["%Q", "%H:%M", "%"] {
            let json = format!(r#"{{"theme": "dark", "date_format": "{}"}}"#, bad);
            std::fs::write(paths.settings_file(), json).unwrap();

            let loaded = Settings::load_or_create(&paths).unwrap();
            assert_eq!(loaded.date_format, "%Y-%m-%d", "format {:?}", bad);
            assert_eq!(loaded.theme, Theme::Dark);
        }
    }

    #[test]
    fn test_set_date_format() {
        let mut settings = Settings::default();
        settings.set_date_format("%d/%m/%Y").unwrap();
        assert_eq!(settings.date_format, "%d/%m/%Y");

        assert!(settings.set_date_format("%Q").unwrap_err().is_validation());
        assert!(settings.set_date_format("").is_err());
        assert_eq!(settings.date_format, "%d/%m/%Y");
    }

    #[test]
    fn test_theme_parse_and_toggle() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("blue".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_invalid_currency_symbol() {
        let mut settings = Settings::default();
        assert!(settings.set_currency_symbol("  ").is_err());
        assert!(settings.set_currency_symbol("EUROS").is_err());
        assert_eq!(settings.currency_symbol, "€");
    }
}
