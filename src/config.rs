//! Simulation configuration.
//!
//! Settings can come from a TOML file; every key is optional and falls
//! back to the defaults below.
//!
//! ```toml
//! workload = "large"        # small | large | edge
//! seed = 42                 # omit for a fresh random seed
//! process_count = 50
//! max_arrival = 50          # arrivals drawn from [0, max_arrival)
//! max_burst = 50            # bursts drawn from [1, max_burst]
//! algorithms = ["fcfs", "srtf", "hrrn"]
//! tie_breaker = "input-order"   # input-order | by-id
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::dispatching::TieBreaker;
use crate::models::{Algorithm, Ticks};
use crate::workload::{
    WorkloadGenerator, WorkloadKind, DEFAULT_MAX_ARRIVAL, DEFAULT_MAX_BURST,
    DEFAULT_PROCESS_COUNT,
};

/// Configuration for one simulator invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Workload to simulate. `None` = ask the user.
    pub workload: Option<WorkloadKind>,
    /// Seed for the random workload generators.
    pub seed: Option<u64>,
    /// Number of generated processes.
    pub process_count: usize,
    /// Exclusive upper bound on generated arrival times.
    pub max_arrival: Ticks,
    /// Inclusive upper bound on generated burst times.
    pub max_burst: Ticks,
    /// Algorithms to run, in reporting order.
    pub algorithms: Vec<Algorithm>,
    /// Tie-break applied after each algorithm's selection rule.
    pub tie_breaker: TieBreaker,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            workload: None,
            seed: None,
            process_count: DEFAULT_PROCESS_COUNT,
            max_arrival: DEFAULT_MAX_ARRIVAL,
            max_burst: DEFAULT_MAX_BURST,
            algorithms: Algorithm::ALL.to_vec(),
            tie_breaker: TieBreaker::InputOrder,
        }
    }
}

/// Errors from loading or checking a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema.
    Parse(toml::de::Error),
    /// The values are well-formed but unusable.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read config '{}': {source}", path.display())
            }
            ConfigError::Parse(e) => write!(f, "invalid config: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl SimulationConfig {
    /// Parses and checks a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and checks a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!("loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Checks that the configuration can drive a simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.algorithms.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one algorithm must be selected".to_string(),
            ));
        }
        self.generator()
            .check()
            .map_err(|e| ConfigError::Invalid(e.0))
    }

    /// The random workload generator these settings describe.
    pub fn generator(&self) -> WorkloadGenerator {
        WorkloadGenerator {
            count: self.process_count,
            max_arrival: self.max_arrival,
            max_burst: self.max_burst,
        }
    }
}
