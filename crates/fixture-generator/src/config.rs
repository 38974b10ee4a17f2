//! Generator configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Values that cannot produce fixtures
    #[error("Invalid generator config: {0}")]
    Invalid(String),
}

/// Widest accepted `date_spread_days` (about 100,000 years), keeping every
/// generated date inside chrono's representable range.
pub const MAX_DATE_SPREAD_DAYS: i64 = 36_500_000;

/// Tunables for fixture generation.
///
/// Every field has a default, so a config file only needs the fields it
/// changes:
///
/// ```yaml
/// seed: 42
/// max_depth: 16
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed for the default random source; `None` seeds from entropy
    pub seed: Option<u64>,

    /// Maximum nesting of lazy (self-referential) schemas
    pub max_depth: usize,

    /// Number of elements/entries in arrays, records, maps and sets
    pub collection_size: usize,

    /// Total draws allowed when filling a set or record/map keys with
    /// distinct values
    pub unique_attempts: usize,

    /// Lower bound of unconstrained numbers (inclusive)
    pub number_min: f64,

    /// Upper bound of unconstrained numbers (inclusive)
    pub number_max: f64,

    /// Dates fall within this many days either side of now
    pub date_spread_days: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_depth: 32,
            collection_size: 3,
            unique_attempts: 100,
            number_min: 1.0,
            number_max: 500.0,
            date_spread_days: 730,
        }
    }
}

impl GeneratorConfig {
    /// Load config from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Builder-style seed override.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder-style recursion ceiling override.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Reject values that cannot produce fixtures.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_min > self.number_max {
            return Err(ConfigError::Invalid(format!(
                "number_min ({}) is greater than number_max ({})",
                self.number_min, self.number_max
            )));
        }
        if self.unique_attempts < self.collection_size {
            return Err(ConfigError::Invalid(format!(
                "unique_attempts ({}) must be at least collection_size ({})",
                self.unique_attempts, self.collection_size
            )));
        }
        if !(0..=MAX_DATE_SPREAD_DAYS).contains(&self.date_spread_days) {
            return Err(ConfigError::Invalid(format!(
                "date_spread_days ({}) must be between 0 and {}",
                self.date_spread_days, MAX_DATE_SPREAD_DAYS
            )));
        }
        Ok(())
    }
}
