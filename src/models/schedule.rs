//! Schedule (simulation result) model.
//!
//! A schedule holds the fully-scheduled processes returned by one
//! simulator run, in the order that simulator reports them, together with
//! the CPU timeline that produced them.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3

use serde::{Deserialize, Serialize};

use super::{Algorithm, Process, ProcessId, Ticks};

/// The result of simulating one workload under one algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// Algorithm that produced this schedule.
    pub algorithm: Algorithm,
    /// Scheduled processes, in the simulator's output order.
    pub processes: Vec<Process>,
    /// CPU timeline. Gaps between slices are idle time.
    pub slices: Vec<ExecutionSlice>,
}

/// A contiguous interval during which one process held the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSlice {
    /// Process that ran.
    pub process_id: ProcessId,
    /// First tick of the interval.
    pub start: Ticks,
    /// End of the interval (exclusive).
    pub end: Ticks,
}

impl ExecutionSlice {
    /// Creates a slice.
    pub fn new(process_id: ProcessId, start: Ticks, end: Ticks) -> Self {
        Self {
            process_id,
            start,
            end,
        }
    }

    /// Length of the interval.
    #[inline]
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

impl Schedule {
    /// Creates an empty schedule for the given algorithm.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            processes: Vec::new(),
            slices: Vec::new(),
        }
    }

    /// Appends a finished process to the output order.
    pub fn add_process(&mut self, process: Process) {
        self.processes.push(process);
    }

    /// Records CPU time for a process.
    ///
    /// A slice that directly continues the previous slice of the same
    /// process is merged into it, so a preemptive run that keeps the same
    /// process for several ticks yields a single slice.
    pub fn record_execution(&mut self, process_id: ProcessId, start: Ticks, end: Ticks) {
        if let Some(last) = self.slices.last_mut() {
            if last.process_id == process_id && last.end == start {
                last.end = end;
                return;
            }
        }
        self.slices.push(ExecutionSlice::new(process_id, start, end));
    }

    /// Number of scheduled processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether the schedule contains no processes.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Whether every process has a completion time.
    pub fn is_complete(&self) -> bool {
        self.processes.iter().all(Process::is_complete)
    }

    /// Makespan: latest completion time (0 for an empty schedule).
    pub fn makespan(&self) -> Ticks {
        self.processes
            .iter()
            .filter_map(|p| p.time_complete)
            .max()
            .unwrap_or(0)
    }

    /// Total time the CPU spent executing processes.
    pub fn busy_time(&self) -> Ticks {
        self.slices.iter().map(ExecutionSlice::duration).sum()
    }

    /// Total time the CPU sat idle before the makespan.
    pub fn idle_time(&self) -> Ticks {
        self.makespan() - self.busy_time()
    }

    /// Number of times the CPU switched from one process to another.
    ///
    /// Idle gaps between two slices of the same process do not count.
    pub fn context_switches(&self) -> usize {
        self.slices
            .windows(2)
            .filter(|w| w[0].process_id != w[1].process_id)
            .count()
    }

    /// Finds a scheduled process by ID.
    pub fn process(&self, id: ProcessId) -> Option<&Process> {
        self.processes.iter().find(|p| p.id == id)
    }

    /// Returns all timeline slices of a process.
    pub fn slices_for(&self, id: ProcessId) -> Vec<&ExecutionSlice> {
        self.slices.iter().filter(|s| s.process_id == id).collect()
    }

    /// Process IDs in the order they completed.
    pub fn completion_order(&self) -> Vec<ProcessId> {
        let mut finished: Vec<&Process> =
            self.processes.iter().filter(|p| p.is_complete()).collect();
        finished.sort_by_key(|p| p.time_complete);
        finished.iter().map(|p| p.id).collect()
    }
}
