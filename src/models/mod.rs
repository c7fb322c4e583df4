//! Simulation domain models.
//!
//! Provides the data types shared by every simulator: the process record
//! a run mutates, the algorithm identifiers, and the schedule a run
//! returns.
//!
//! # Lifecycle
//!
//! | Stage | Owner | State |
//! |-------|-------|-------|
//! | Provided | workload provider | static fields only |
//! | Cloned | one simulator run | `time_remaining = burst`, no timestamps |
//! | Scheduled | `Schedule` | all timestamps set, `time_remaining = 0` |

mod algorithm;
mod process;
mod schedule;

pub use algorithm::{Algorithm, ParseAlgorithmError};
pub use process::{clone_workload, Process, ProcessId, Ticks};
pub use schedule::{ExecutionSlice, Schedule};
