//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `splitbill.toml` in the working directory unless a path is
//! given explicitly. Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::path::Path;

use serde::Deserialize;

const DEFAULT_PATH: &str = "splitbill.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Summary rendering settings.
    pub summary: SummaryConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// How the summary is computed and printed.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Tax rate in percent applied when the sheet does not set one.
    pub tax_rate: Option<f64>,
    /// Output format.
    pub format: OutputFormat,
    /// Use deterministic `"{prefix}-{n}"` ids instead of random UUIDs.
    pub id_prefix: Option<String>,
}

/// Rendering of the exported summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Config {
    /// Load configuration from `path` (or `splitbill.toml` if none is given)
    /// then apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file is malformed, if an explicitly given
    /// file cannot be read, or if the resulting values are invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path, true)?,
            None => Self::from_file(Path::new(DEFAULT_PATH), false)?,
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path, required: bool) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("SPLITBILL_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("SPLITBILL_TAX_RATE") {
            self.summary.tax_rate = parse_tax_rate(&val)?;
        }
        if let Ok(val) = std::env::var("SPLITBILL_FORMAT") {
            self.summary.format = match val.to_ascii_lowercase().as_str() {
                "text" => OutputFormat::Text,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::Validation(format!(
                        "unknown output format {val:?}"
                    )));
                }
            };
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(rate) = self.summary.tax_rate {
            if !rate.is_finite() {
                return Err(ConfigError::Validation(
                    "tax rate must be a finite number".to_string(),
                ));
            }
        }
        if let Some(prefix) = &self.summary.id_prefix {
            if prefix.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "id prefix must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// An empty value or `none` disables tax.
fn parse_tax_rate(value: &str) -> Result<Option<f64>, ConfigError> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::Validation(format!("invalid tax rate {value:?}")))
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
