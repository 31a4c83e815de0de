//! Configuration system for binalloc.
//!
//! Load allocator configuration from TOML or YAML to toggle constraint
//! families and tune the uniform policy without code changes.
//!
//! # Examples
//!
//! ```
//! use binalloc_config::AllocatorConfig;
//!
//! let config = AllocatorConfig::from_toml_str(r#"
//!     [options]
//!     disable_even_distribution = true
//!
//!     [policy]
//!     capacity = 25
//!     max_churn = 3
//! "#).unwrap();
//!
//! assert!(!config.options.even_distribution());
//! assert_eq!(config.policy().capacity, 25);
//! assert_eq!(config.policy().copies, 1);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use binalloc_config::AllocatorConfig;
//!
//! let config = AllocatorConfig::load("allocator.toml").unwrap_or_default();
//! ```

use std::path::Path;

use binalloc_core::{AllocationOptions, UniformPolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main allocator configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AllocatorConfig {
    /// Optional constraint families.
    #[serde(default)]
    pub options: AllocationOptions,

    /// Uniform policy constants.
    #[serde(default)]
    pub policy: UniformPolicyConfig,

    /// Model construction settings.
    #[serde(default)]
    pub solver: SolverSettings,
}

impl AllocatorConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML, or
    /// holds out-of-range values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Replaces the option toggles.
    pub fn with_options(mut self, options: AllocationOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the per-bin capacity.
    pub fn with_capacity(mut self, capacity: i64) -> Self {
        self.policy.capacity = capacity;
        self
    }

    /// Sets the churn budget.
    pub fn with_max_churn(mut self, max_churn: u32) -> Self {
        self.policy.max_churn = max_churn;
        self
    }

    /// Sets the replication factor.
    pub fn with_copies(mut self, copies: u32) -> Self {
        self.policy.copies = copies;
        self
    }

    /// Checks value ranges that the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.policy.copies == 0 {
            return Err(ConfigError::Invalid("policy.copies must be at least 1".into()));
        }
        if self.policy.capacity < 0 {
            return Err(ConfigError::Invalid(format!(
                "policy.capacity must be non-negative, got {}",
                self.policy.capacity
            )));
        }
        let bound = self.solver.max_surplus_bound;
        if !(0..=SolverSettings::MAX_SURPLUS_BOUND_LIMIT).contains(&bound) {
            return Err(ConfigError::Invalid(format!(
                "solver.max_surplus_bound must be in [0, {}], got {}",
                SolverSettings::MAX_SURPLUS_BOUND_LIMIT,
                bound
            )));
        }
        Ok(())
    }

    /// Returns the configured uniform policy.
    pub fn policy(&self) -> UniformPolicy {
        UniformPolicy {
            copies: self.policy.copies,
            cost: self.policy.cost,
            capacity: self.policy.capacity,
            max_churn: self.policy.max_churn,
        }
    }
}

/// Uniform policy constants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct UniformPolicyConfig {
    /// Replication factor applied to every item.
    pub copies: u32,

    /// Cost of every item in every resource.
    pub cost: u32,

    /// Capacity of every bin.
    pub capacity: i64,

    /// Prior placements a round may abandon.
    pub max_churn: u32,
}

impl Default for UniformPolicyConfig {
    fn default() -> Self {
        let policy = UniformPolicy::default();
        Self {
            copies: policy.copies,
            cost: policy.cost,
            capacity: policy.capacity,
            max_churn: policy.max_churn,
        }
    }
}

/// Model construction settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SolverSettings {
    /// Upper bound of the auxiliary max-surplus variable.
    pub max_surplus_bound: i64,
}

impl SolverSettings {
    pub const DEFAULT_MAX_SURPLUS_BOUND: i64 = 100;

    /// Largest accepted `max_surplus_bound`. Integers up to 2^53 convert to
    /// `f64` exactly.
    pub const MAX_SURPLUS_BOUND_LIMIT: i64 = 1 << 53;
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_surplus_bound: Self::DEFAULT_MAX_SURPLUS_BOUND,
        }
    }
}

#[cfg(test)]
mod tests;
