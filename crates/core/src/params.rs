//! Simulation configuration
//!
//! Parameters are immutable for the lifetime of a run and are validated at
//! the entry points (`run_model`, `collect_statistics`) so precondition
//! violations surface before any work starts, never mid-run.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete configuration of a statistics collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Lattice edge length L (cells per side, boundary ring included).
    pub grid_size: usize,
    /// Probability p that an interior cell starts as a tree.
    pub tree_density: f64,
    /// Probability g that an empty cell regrows a tree per step.
    pub regrowth_probability: f64,
    /// Warm-up fire episodes run and discarded before measurement.
    pub warmup_fires: usize,
    /// Measured fire episodes per replicate.
    pub measured_fires: usize,
    /// Independent model replicates.
    pub replicates: usize,
    /// Worker threads for the replicate pool.
    pub workers: usize,
}

impl Default for SimulationParameters {
    /// The reference configuration: a 200-cell lattice at 0.4 starting
    /// density with sparse regrowth, measured over 100 fires per replicate.
    fn default() -> Self {
        Self {
            grid_size: 200,
            tree_density: 0.4,
            regrowth_probability: 0.0001,
            warmup_fires: 0,
            measured_fires: 100,
            replicates: 8,
            workers: 1,
        }
    }
}

impl SimulationParameters {
    /// Check every precondition, reporting the first violation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] naming the offending field
    /// when the lattice is too small to have interior cells, a probability
    /// is outside [0, 1] or non-finite, or an episode/replicate/worker
    /// count is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 3 {
            return Err(ConfigError::invalid_parameter(
                "grid_size",
                format!("needs interior cells, got {}", self.grid_size),
            ));
        }
        if !probability(self.tree_density) {
            return Err(ConfigError::invalid_parameter(
                "tree_density",
                format!("must be a probability in [0, 1], got {}", self.tree_density),
            ));
        }
        if !probability(self.regrowth_probability) {
            return Err(ConfigError::invalid_parameter(
                "regrowth_probability",
                format!(
                    "must be a probability in [0, 1], got {}",
                    self.regrowth_probability
                ),
            ));
        }
        if self.measured_fires == 0 {
            return Err(ConfigError::invalid_parameter(
                "measured_fires",
                "at least one measured episode is required".to_string(),
            ));
        }
        if self.replicates == 0 {
            return Err(ConfigError::invalid_parameter(
                "replicates",
                "at least one replicate is required".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(ConfigError::invalid_parameter(
                "workers",
                "at least one worker is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate parameters from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, is not valid
    /// JSON for this type, or the loaded values fail validation.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed(e.to_string()))?;
        let params: Self =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }
}

fn probability(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

/// Errors raised while building or checking a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A parameter violates its precondition.
    InvalidParameter {
        /// Field name of the offending parameter.
        name: &'static str,
        /// Why the value is rejected.
        reason: String,
    },
    /// Failed to read a parameter file.
    LoadFailed(String),
    /// Failed to parse a parameter file's contents.
    ParseFailed(String),
}

impl ConfigError {
    fn invalid_parameter(name: &'static str, reason: String) -> Self {
        ConfigError::InvalidParameter { name, reason }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidParameter { name, reason } => {
                write!(f, "Parameter '{name}': {reason}")
            }
            ConfigError::LoadFailed(msg) => write!(f, "Failed to load parameters: {msg}"),
            ConfigError::ParseFailed(msg) => write!(f, "Failed to parse parameters: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
