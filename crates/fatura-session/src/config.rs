//! # Session Configuration
//!
//! The few settings that stay constant for a whole session.
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults          office "Fatura", "$", arabic, Downloads folder    │
//! │  2. fatura.toml       platform config dir, or an explicit path          │
//! │  3. Environment       FATURA_OFFICE_NAME, FATURA_CURRENCY_SYMBOL,       │
//! │                       FATURA_LOCALE, FATURA_DOWNLOAD_DIR                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example fatura.toml
//! ```toml
//! office_name = "Al Noor Trading"
//! currency_symbol = "$"
//! locale = "english"
//! download_dir = "/home/sami/Invoices"
//! ```

use std::path::{Path, PathBuf};

use fatura_core::naming::Locale;
use fatura_core::validation::{validate_currency_symbol, validate_office_name};
use fatura_core::{ValidationError, DEFAULT_CURRENCY_SYMBOL, DEFAULT_OFFICE_NAME};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),

    #[error("No download directory configured and none could be detected")]
    NoDownloadDir,
}

/// Session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaturaConfig {
    /// Printed at the top of every report and in share captions.
    pub office_name: String,

    pub currency_symbol: String,

    /// Language of dates, file labels and captions.
    pub locale: Locale,

    /// Where saved reports go. `None` means the user's Downloads folder.
    pub download_dir: Option<PathBuf>,
}

impl Default for FaturaConfig {
    fn default() -> Self {
        Self {
            office_name: DEFAULT_OFFICE_NAME.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            locale: Locale::default(),
            download_dir: None,
        }
    }
}

impl FaturaConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_office_name(&self.office_name)?;
        validate_currency_symbol(&self.currency_symbol)?;
        Ok(())
    }

    /// Applies `FATURA_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("FATURA_OFFICE_NAME") {
            debug!(office_name = %name, "Overriding office name from environment");
            self.office_name = name;
        }

        if let Some(symbol) = lookup("FATURA_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(locale) = lookup("FATURA_LOCALE") {
            match locale.parse() {
                Ok(parsed) => self.locale = parsed,
                Err(_) => warn!(locale = %locale, "Unknown locale in environment"),
            }
        }

        if let Some(dir) = lookup("FATURA_DOWNLOAD_DIR") {
            debug!(dir = %dir, "Overriding download directory from environment");
            self.download_dir = Some(PathBuf::from(dir));
        }
    }

    /// The directory saved reports are written to.
    pub fn resolved_download_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.download_dir {
            return Ok(dir.clone());
        }
        directories::UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
            .ok_or(ConfigError::NoDownloadDir)
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "fatura", "fatura")
            .map(|dirs| dirs.config_dir().join("fatura.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = FaturaConfig::default();
        assert_eq!(config.office_name, "Fatura");
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.locale, Locale::Arabic);
        assert!(config.download_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = FaturaConfig::default();
        config.office_name = "   ".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = FaturaConfig::default();
        config.currency_symbol = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_partial_file() {
        let config: FaturaConfig = toml::from_str(
            r#"
            office_name = "Al Noor"
            locale = "english"
            "#,
        )
        .unwrap();

        assert_eq!(config.office_name, "Al Noor");
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("FATURA_OFFICE_NAME", "Env Office"),
            ("FATURA_LOCALE", "en"),
            ("FATURA_DOWNLOAD_DIR", "/tmp/invoices"),
        ]
        .into_iter()
        .collect();

        let mut config = FaturaConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.office_name, "Env Office");
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.resolved_download_dir().unwrap(), PathBuf::from("/tmp/invoices"));
    }

    #[test]
    fn test_unknown_locale_is_ignored() {
        let mut config = FaturaConfig::default();
        config.apply_overrides(|key| (key == "FATURA_LOCALE").then(|| "klingon".to_string()));
        assert_eq!(config.locale, Locale::Arabic);
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fatura.toml");
        std::fs::write(&path, "office_name = \"File Office\"\ncurrency_symbol = \"€\"\n").unwrap();

        let config = FaturaConfig::from_file(&path).unwrap();
        assert_eq!(config.office_name, "File Office");
        assert_eq!(config.currency_symbol, "€");
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "office_name = [").unwrap();

        assert!(matches!(FaturaConfig::from_file(file.path()), Err(ConfigError::Parse(_))));
    }
}
