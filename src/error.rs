//! Simulation and metrics errors.

use std::fmt;

use crate::models::{Algorithm, ProcessId, Ticks};
use crate::validation::ValidationError;

/// Errors raised by simulators and the metrics calculator.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// The workload failed validation; every detected problem is listed.
    InvalidWorkload(Vec<ValidationError>),
    /// Metrics were requested for zero processes.
    EmptyWorkload,
    /// Metrics were requested for a process that never ran to completion.
    IncompleteSchedule {
        /// The unfinished process.
        process_id: ProcessId,
    },
    /// A simulator loop passed the latest time any valid schedule can end.
    Stalled {
        /// Simulator that stalled.
        algorithm: Algorithm,
        /// Simulation time when the loop gave up.
        time: Ticks,
        /// Upper bound on the makespan of the workload.
        horizon: Ticks,
    },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidWorkload(errors) => {
                write!(f, "invalid workload: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{e}")?;
                }
                Ok(())
            }
            SimulationError::EmptyWorkload => {
                write!(f, "cannot compute metrics for an empty workload")
            }
            SimulationError::IncompleteSchedule { process_id } => {
                write!(f, "process {process_id} was never scheduled to completion")
            }
            SimulationError::Stalled {
                algorithm,
                time,
                horizon,
            } => write!(
                f,
                "{algorithm} simulation made no progress: t={time} passed horizon {horizon}"
            ),
        }
    }
}

impl std::error::Error for SimulationError {}

impl From<Vec<ValidationError>> for SimulationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SimulationError::InvalidWorkload(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;
    use crate::validation::validate_workload;

    #[test]
    fn test_display_invalid_workload() {
        let errors = validate_workload(&[Process::new(3, 0, 0), Process::new(3, -1, 2)])
            .unwrap_err();
        let msg = SimulationError::from(errors).to_string();
        assert!(msg.starts_with("invalid workload: "));
        assert!(msg.contains("Process 3 has non-positive burst time 0"));
        assert!(msg.contains("; "));
    }

    #[test]
    fn test_display_stalled() {
        let err = SimulationError::Stalled {
            algorithm: Algorithm::Srtf,
            time: 12,
            horizon: 11,
        };
        assert_eq!(
            err.to_string(),
            "SRTF simulation made no progress: t=12 passed horizon 11"
        );
    }
}
