//! Scheduling algorithm identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The scheduling policies the simulator implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// First-Come-First-Served (non-preemptive).
    Fcfs,
    /// Shortest-Remaining-Time-First (preemptive).
    Srtf,
    /// Highest-Response-Ratio-Next (non-preemptive).
    Hrrn,
}

impl Algorithm {
    /// Every algorithm, in reporting order.
    pub const ALL: [Algorithm; 3] = [Algorithm::Fcfs, Algorithm::Srtf, Algorithm::Hrrn];

    /// Short uppercase name (e.g., "SRTF").
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Srtf => "SRTF",
            Algorithm::Hrrn => "HRRN",
        }
    }

    /// Full algorithm name.
    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "First-Come-First-Served",
            Algorithm::Srtf => "Shortest-Remaining-Time-First",
            Algorithm::Hrrn => "Highest-Response-Ratio-Next",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(pub String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown scheduling algorithm '{}' (expected fcfs, srtf or hrrn)",
            self.0
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Algorithm::Fcfs),
            "srtf" => Ok(Algorithm::Srtf),
            "hrrn" => Ok(Algorithm::Hrrn),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}
