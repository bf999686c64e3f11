use crate::error::ConfigError;
use core_types::StarPolicy;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data_source: DataSource,
    #[serde(default)]
    pub display: Display,
    #[serde(default)]
    pub logging: Logging,
}

/// Where the sales sheet lives and how to read it.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSource {
    /// Path to the CSV export of the `Sales` worksheet.
    pub path: PathBuf,
    /// Banner rows above the header line (titles, blank spacer rows).
    #[serde(default)]
    pub skip_rows: usize,
    /// Stop after this many data rows. `None` reads the whole sheet.
    #[serde(default)]
    pub max_rows: Option<usize>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

/// Contains parameters for how KPIs are presented.
#[derive(Debug, Clone, Deserialize)]
pub struct Display {
    #[serde(default)]
    pub star_policy: StarPolicy,
    /// Prefix for monetary amounts, e.g. "US $".
    #[serde(default = "default_currency_label")]
    pub currency_label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    /// Default `EnvFilter` directive. `RUST_LOG` takes precedence when set.
    #[serde(default = "default_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

// --- Default Implementations ---
// This allows a user to omit the `[display]` and `[logging]` sections
// from their toml and still have it work with sensible defaults.

fn default_delimiter() -> char {
    ','
}

fn default_currency_label() -> String {
    "US $".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for Display {
    fn default() -> Self {
        Self {
            star_policy: StarPolicy::default(),
            currency_label: default_currency_label(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: default_level(),
            directory: None,
        }
    }
}

impl Config {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_source.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "data_source.path must not be empty".to_string(),
            ));
        }
        if !self.data_source.delimiter.is_ascii() {
            return Err(ConfigError::ValidationError(format!(
                "data_source.delimiter must be a single ASCII character, got '{}'",
                self.data_source.delimiter
            )));
        }
        if self.data_source.max_rows == Some(0) {
            return Err(ConfigError::ValidationError(
                "data_source.max_rows must be greater than zero when set".to_string(),
            ));
        }
        Ok(())
    }
}
