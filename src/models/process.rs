//! Process (job) model.
//!
//! A process is the unit of work handed to a simulator: static input
//! attributes fixed by the workload provider plus the timestamps a
//! simulation run fills in.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};

/// Process identifier assigned by the workload provider.
pub type ProcessId = u32;

/// Simulation time in abstract integer units (t=0 is the epoch).
pub type Ticks = i64;

/// A process to be scheduled on the simulated CPU.
///
/// `arrival_time` and `burst_time` never change after creation. The
/// remaining fields are owned by whichever simulator is running this copy;
/// `time_start` and `time_complete` stay `None` until the process first
/// runs and finishes respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier.
    pub id: ProcessId,
    /// Time at which the process becomes eligible to run.
    pub arrival_time: Ticks,
    /// Total CPU time the process needs.
    pub burst_time: Ticks,
    /// CPU time still owed to the process.
    pub time_remaining: Ticks,
    /// Time of first execution. `None` = not yet started.
    pub time_start: Option<Ticks>,
    /// Time at which the last unit of work finished. `None` = not completed.
    pub time_complete: Option<Ticks>,
}

impl Process {
    /// Creates a fresh, unscheduled process.
    pub fn new(id: ProcessId, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            time_remaining: burst_time,
            time_start: None,
            time_complete: None,
        }
    }

    /// Copies the static attributes and resets all simulation state.
    ///
    /// The copy is fully independent of `self`.
    pub fn fresh_copy(&self) -> Self {
        Self::new(self.id, self.arrival_time, self.burst_time)
    }

    /// Whether the process has arrived by `time`.
    #[inline]
    pub fn is_ready_at(&self, time: Ticks) -> bool {
        self.arrival_time <= time
    }

    /// Whether the process has run to completion.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.time_complete.is_some()
    }

    /// Turnaround time: completion - arrival.
    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.time_complete.map(|c| c - self.arrival_time)
    }

    /// Waiting time: turnaround - burst.
    pub fn waiting_time(&self) -> Option<Ticks> {
        self.turnaround_time().map(|tat| tat - self.burst_time)
    }

    /// Response time: first execution - arrival.
    pub fn response_time(&self) -> Option<Ticks> {
        self.time_start.map(|s| s - self.arrival_time)
    }

    /// HRRN response ratio at `time`: `(wait + burst) / burst`.
    ///
    /// Always >= 1.0 once the process has arrived.
    pub fn response_ratio(&self, time: Ticks) -> f64 {
        (time - self.arrival_time + self.burst_time) as f64 / self.burst_time as f64
    }
}

/// Produces an independent, freshly reset copy of a workload.
pub fn clone_workload(processes: &[Process]) -> Vec<Process> {
    processes.iter().map(Process::fresh_copy).collect()
}
