//! Configuration types for the simulation.

use crate::{Day, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Lifecycle rule constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Eggs produced by one laying event
    pub eggs_per_laying: u32,
    /// Days an egg waits in the queue before it is ready to hatch
    pub incubation_days: Day,
    /// Days between mating and the first laying, and between layings
    pub laying_interval_days: Day,
    /// Layings after which a female dies
    pub max_layings: u32,
    /// Days a mated male survives past his mating day
    pub male_days_after_mating: Day,
    /// Probability that a hatched egg is male (0.0 to 1.0)
    pub male_ratio: f64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            eggs_per_laying: 100,
            incubation_days: 12,
            laying_interval_days: 3,
            max_layings: 3,
            male_days_after_mating: 5,
            male_ratio: 0.5,
        }
    }
}

impl LifecycleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.incubation_days == 0 {
            return Err(Error::Validation(
                "incubation_days must be at least 1".to_string(),
            ));
        }
        // A zero interval would let a female mate and lay on the same day.
        if self.laying_interval_days == 0 {
            return Err(Error::Validation(
                "laying_interval_days must be at least 1".to_string(),
            ));
        }
        if self.max_layings == 0 {
            return Err(Error::Validation("max_layings must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.male_ratio) {
            return Err(Error::Validation(format!(
                "male_ratio must be within [0, 1], got {}",
                self.male_ratio
            )));
        }
        Ok(())
    }
}

/// Configuration for a single simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of days to simulate
    pub days: Day,
    /// Seed for sex assignment; `None` draws one from OS entropy
    pub seed: Option<u64>,
    /// Lifecycle rules
    pub lifecycle: LifecycleConfig,
    /// Emit a progress log every this many days (0 disables)
    pub log_every: Day,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days: 30,
            seed: None,
            lifecycle: LifecycleConfig::default(),
            log_every: 10,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        self.lifecycle.validate()
    }

    /// Load and validate a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading simulation config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        let config: SimulationConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration for a batch of independent runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleConfig {
    /// Number of independent runs
    pub runs: usize,
    /// Run `i` is seeded with `base_seed + i`
    pub base_seed: u64,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            runs: 100,
            base_seed: 0,
        }
    }
}

impl EnsembleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.runs == 0 {
            return Err(Error::Validation("runs must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn seed_for(&self, run: usize) -> u64 {
        self.base_seed.wrapping_add(run as u64)
    }
}
