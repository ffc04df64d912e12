//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::parse::CenturyRule;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Date parsing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseConfig {
    /// Two-digit years at or above this belong to `current_century`
    #[serde(default = "default_century_cutoff")]
    pub century_cutoff: u32,

    #[serde(default = "default_current_century")]
    pub current_century: u32,

    #[serde(default = "default_next_century")]
    pub next_century: u32,
}

fn default_century_cutoff() -> u32 {
    90
}

fn default_current_century() -> u32 {
    19
}

fn default_next_century() -> u32 {
    20
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            century_cutoff: default_century_cutoff(),
            current_century: default_current_century(),
            next_century: default_next_century(),
        }
    }
}

impl ParseConfig {
    pub fn century_rule(&self) -> CenturyRule {
        CenturyRule {
            cutoff: self.century_cutoff,
            current_century: self.current_century,
            next_century: self.next_century,
        }
    }
}

/// Report defaults. Command-line flags can only turn these on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Keep records spanning a day or more
    #[serde(default)]
    pub all: bool,

    #[serde(default)]
    pub csv: bool,

    /// CSV header line
    #[serde(default)]
    pub title: bool,

    #[serde(default)]
    pub verbose: u8,
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log filter used when neither RUST_LOG nor --log-level is given
    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub parse: ParseConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Config file picked up from the working directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "rtave.toml";

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `explicit` if given (it must exist), otherwise `rtave.toml` if
    /// present, otherwise defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parse.century_cutoff > 99 {
            return Err(ConfigError::ValidationError(
                "century_cutoff must be between 0 and 99".to_string(),
            ));
        }

        if self.parse.current_century > 99 || self.parse.next_century > 99 {
            return Err(ConfigError::ValidationError(
                "centuries must be between 0 and 99".to_string(),
            ));
        }

        if self.parse.next_century != self.parse.current_century + 1 {
            return Err(ConfigError::ValidationError(
                "next_century must follow current_century".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert!(config.log_level.is_none());
        assert_eq!(config.parse.century_cutoff, 90);
        assert!(!config.report.all);
        assert!(!config.report.csv);
        assert_eq!(config.report.verbose, 0);
    }

    #[test]
    fn test_century_rule_from_config() {
        let rule = ParseConfig::default().century_rule();
        assert_eq!(rule, CenturyRule::default());
        assert_eq!(rule.resolve(5), 2005);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_cutoff() {
        let mut config = AppConfig::default();
        config.parse.century_cutoff = 100;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_centuries() {
        let mut config = AppConfig::default();
        config.parse.next_century = 21;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rtave.toml");
        std::fs::write(
            &path,
            r#"
log_level = "debug"

[parse]
century_cutoff = 50

[report]
csv = true
"#,
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.parse.century_cutoff, 50);
        assert_eq!(config.parse.current_century, 19);
        assert!(config.report.csv);
        assert!(!config.report.title);
    }

    #[test]
    fn test_config_invalid_file_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rtave.toml");
        std::fs::write(&path, "[parse]\ncentury_cutoff = 120\n").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_discover_explicit_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.toml");

        assert!(matches!(
            AppConfig::discover(Some(&path)),
            Err(ConfigError::ReadError(_))
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        // Should be parseable
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.parse.century_cutoff, parsed.parse.century_cutoff);
    }
}
