//! Calculator configuration.
//!
//! Loaded from TOML. Every field has a default, so a partial file (or no
//! file) is valid:
//!
//! ```toml
//! [bounds]
//! max_principal = 10000000.0
//! max_rate_percent = 30.0
//! max_term_years = 50
//! allow_zero_rate = false
//!
//! [forecast]
//! min_samples = 4
//! sample_step_months = 12
//! display_terms = 4
//!
//! [output]
//! currency = "usd"
//! schedule_preview_rows = 0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use loancast_loans::forecast::DEFAULT_MIN_SAMPLES;
use loancast_loans::terms::LoanBounds;
use loancast_math::interpolation::DEFAULT_MAX_TERMS;

use crate::cli::Currency;
use crate::error::{CliError, CliResult};

/// Directory name under the platform config directory.
const APP_DIR: &str = "loancast";

/// Configuration file name.
const CONFIG_FILE: &str = "config.toml";

/// Full calculator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Accepted loan terms.
    pub bounds: LoanBounds,
    /// Forecasting policy.
    pub forecast: ForecastConfig,
    /// Display settings.
    pub output: OutputConfig,
}

/// Forecasting policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Samples required before predicting.
    pub min_samples: usize,
    /// Step used when months are auto-selected.
    pub sample_step_months: u32,
    /// Terms shown in the Newton-form polynomial.
    pub display_terms: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            min_samples: DEFAULT_MIN_SAMPLES,
            sample_step_months: 12,
            display_terms: DEFAULT_MAX_TERMS,
        }
    }
}

/// Display settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Currency symbol for amounts.
    pub currency: Currency,
    /// Rows shown by `schedule` in table format (0 = all).
    pub schedule_preview_rows: usize,
}

impl CalculatorConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Resolves the effective configuration.
    ///
    /// An explicit path must exist. Otherwise the default location is used
    /// when present, and built-in defaults when not.
    pub fn resolve(explicit: Option<&Path>) -> CliResult<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading configuration");
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading configuration");
                Self::from_file(&path)
            }
            _ => {
                tracing::debug!("using default configuration");
                Ok(Self::default())
            }
        }
    }

    /// Loads `path` if it exists, built-in defaults if it does not.
    ///
    /// Returns whether the file was read.
    pub fn load_or_default(path: &Path) -> CliResult<(Self, bool)> {
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading configuration");
            Ok((Self::from_file(path)?, true))
        } else {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            Ok((Self::default(), false))
        }
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml_string(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Serialization(e.to_string()))
    }

    /// Writes the configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

/// Default configuration file location.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}
