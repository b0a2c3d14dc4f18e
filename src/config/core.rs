//! Core configuration structure and builder for claims-metrics.

use crate::core::constants::*;
use crate::core::error::{MetricsError, Result};
use crate::metrics::deviance::validate_power;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Evaluation, splitting and winsorization settings.
///
/// Every field has a default, so partial JSON/TOML files are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tweedie power used when no power is passed explicitly
    pub tweedie_power: f64,
    /// Decimals shown when rendering scorecards
    pub display_precision: usize,
    /// Fraction of rows (or groups) assigned to the training sample
    pub training_frac: f64,
    /// Seed of the group-aware random split
    pub split_seed: u64,
    /// Separator joining several identifier columns
    pub id_separator: String,
    /// Lower winsorization quantile
    pub winsor_lower_quantile: f64,
    /// Upper winsorization quantile
    pub winsor_upper_quantile: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tweedie_power: DEFAULT_TWEEDIE_POWER,
            display_precision: DEFAULT_DISPLAY_PRECISION,
            training_frac: DEFAULT_TRAINING_FRAC,
            split_seed: DEFAULT_SPLIT_SEED,
            id_separator: DEFAULT_ID_SEPARATOR.to_string(),
            winsor_lower_quantile: DEFAULT_WINSOR_LOWER_QUANTILE,
            winsor_upper_quantile: DEFAULT_WINSOR_UPPER_QUANTILE,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        validate_power(self.tweedie_power)?;

        if !(self.training_frac > 0.0 && self.training_frac < 1.0) {
            return Err(MetricsError::config(format!(
                "training_frac = {} must be in range (0.0, 1.0)",
                self.training_frac
            )));
        }

        if self.display_precision > 15 {
            return Err(MetricsError::config(format!(
                "display_precision = {} must be at most 15",
                self.display_precision
            )));
        }

        for (name, q) in [
            ("winsor_lower_quantile", self.winsor_lower_quantile),
            ("winsor_upper_quantile", self.winsor_upper_quantile),
        ] {
            if !(0.0..=1.0).contains(&q) {
                return Err(MetricsError::config(format!(
                    "{} = {} must be in range [0.0, 1.0]",
                    name, q
                )));
            }
        }

        if self.winsor_lower_quantile > self.winsor_upper_quantile {
            return Err(MetricsError::config(format!(
                "winsor_lower_quantile ({}) exceeds winsor_upper_quantile ({})",
                self.winsor_lower_quantile, self.winsor_upper_quantile
            )));
        }

        Ok(())
    }

    /// Load configuration from a `.json` or `.toml` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| MetricsError::config(format!("Failed to read config file: {}", e)))?;

        let config: Config = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| MetricsError::config(format!("Failed to parse JSON config: {}", e)))?,
            Some("toml") => toml::from_str(&content)
                .map_err(|e| MetricsError::config(format!("Failed to parse TOML config: {}", e)))?,
            _ => {
                return Err(MetricsError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a `.json` or `.toml` file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)
                .map_err(|e| MetricsError::config(format!("Failed to serialize to JSON: {}", e)))?,
            Some("toml") => toml::to_string_pretty(self)
                .map_err(|e| MetricsError::config(format!("Failed to serialize to TOML: {}", e)))?,
            _ => {
                return Err(MetricsError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        std::fs::write(path, content)
            .map_err(|e| MetricsError::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Load configuration from `CLAIMS_METRICS_*` environment variables
    pub fn load_from_environment() -> Result<Self> {
        let mut config = Config::default();
        config.apply_environment_overrides()?;
        Ok(config)
    }

    /// Override fields for which an environment variable is set
    pub fn apply_environment_overrides(&mut self) -> Result<()> {
        if let Some(power) = env_override("TWEEDIE_POWER")? {
            self.tweedie_power = power;
        }
        if let Some(precision) = env_override("DISPLAY_PRECISION")? {
            self.display_precision = precision;
        }
        if let Some(frac) = env_override("TRAINING_FRAC")? {
            self.training_frac = frac;
        }
        if let Some(seed) = env_override("SPLIT_SEED")? {
            self.split_seed = seed;
        }
        if let Some(separator) = env_override::<String>("ID_SEPARATOR")? {
            self.id_separator = separator;
        }
        if let Some(q) = env_override("WINSOR_LOWER_QUANTILE")? {
            self.winsor_lower_quantile = q;
        }
        if let Some(q) = env_override("WINSOR_UPPER_QUANTILE")? {
            self.winsor_upper_quantile = q;
        }

        self.validate()
    }
}

fn env_override<T: FromStr>(suffix: &str) -> Result<Option<T>> {
    let name = format!("{}{}", ENV_PREFIX, suffix);
    match std::env::var(&name) {
        Ok(val) => val
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| MetricsError::config(format!("Invalid {}: {:?}", name, val))),
        Err(_) => Ok(None),
    }
}

/// Builder for [`Config`]
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder starting from the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default Tweedie power
    pub fn tweedie_power(mut self, power: f64) -> Self {
        self.config.tweedie_power = power;
        self
    }

    /// Set the display precision
    pub fn display_precision(mut self, precision: usize) -> Self {
        self.config.display_precision = precision;
        self
    }

    /// Set the training fraction
    pub fn training_frac(mut self, frac: f64) -> Self {
        self.config.training_frac = frac;
        self
    }

    /// Set the group split seed
    pub fn split_seed(mut self, seed: u64) -> Self {
        self.config.split_seed = seed;
        self
    }

    /// Set the identifier column separator
    pub fn id_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.config.id_separator = separator.into();
        self
    }

    /// Set both winsorization quantiles
    pub fn winsor_quantiles(mut self, lower: f64, upper: f64) -> Self {
        self.config.winsor_lower_quantile = lower;
        self.config.winsor_upper_quantile = upper;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
