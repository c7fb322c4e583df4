//! Schedule performance metrics.
//!
//! Computes the standard single-CPU scheduling indicators from a
//! completed schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total time | Latest completion time |
//! | Avg waiting time | mean(turnaround - burst) |
//! | Avg response time | mean(first start - arrival) |
//! | Avg turnaround time | mean(completion - arrival) |
//! | CPU utilization | total burst / total time * 100 |
//! | Throughput | processes / total time |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2:
//! Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::models::{Process, Schedule, Ticks};

/// Aggregate performance indicators of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    /// Number of processes.
    pub process_count: usize,
    /// Latest completion time.
    pub total_time: Ticks,
    /// Sum of burst times.
    pub total_burst: Ticks,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean response time.
    pub avg_response_time: f64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// CPU utilization in percent (0.0..=100.0).
    pub cpu_utilization: f64,
    /// Completed processes per unit of time.
    pub throughput: f64,
}

impl ScheduleMetrics {
    /// Computes metrics from fully-scheduled processes.
    ///
    /// # Errors
    /// - [`SimulationError::EmptyWorkload`] if `processes` is empty.
    /// - [`SimulationError::IncompleteSchedule`] if any process lacks a
    ///   start or completion time.
    pub fn calculate(processes: &[Process]) -> Result<Self, SimulationError> {
        if processes.is_empty() {
            return Err(SimulationError::EmptyWorkload);
        }

        // per-process sums can exceed Ticks even when every timestamp fits
        let mut total_time: Ticks = 0;
        let mut total_burst: i128 = 0;
        let mut total_waiting: i128 = 0;
        let mut total_response: i128 = 0;
        let mut total_turnaround: i128 = 0;

        for p in processes {
            let incomplete = SimulationError::IncompleteSchedule { process_id: p.id };
            let completion = p.time_complete.ok_or_else(|| incomplete.clone())?;
            let response = p.response_time().ok_or(incomplete)?;
            let turnaround = i128::from(completion) - i128::from(p.arrival_time);

            total_time = total_time.max(completion);
            total_burst += i128::from(p.burst_time);
            total_turnaround += turnaround;
            total_waiting += turnaround - i128::from(p.burst_time);
            total_response += i128::from(response);
        }

        let n = processes.len() as f64;
        let (cpu_utilization, throughput) = if total_time > 0 {
            (
                total_burst as f64 / total_time as f64 * 100.0,
                n / total_time as f64,
            )
        } else {
            (0.0, 0.0)
        };

        Ok(Self {
            process_count: processes.len(),
            total_time,
            total_burst: Ticks::try_from(total_burst).unwrap_or(Ticks::MAX),
            avg_waiting_time: total_waiting as f64 / n,
            avg_response_time: total_response as f64 / n,
            avg_turnaround_time: total_turnaround as f64 / n,
            cpu_utilization,
            throughput,
        })
    }

    /// Computes metrics for a schedule's processes.
    pub fn from_schedule(schedule: &Schedule) -> Result<Self, SimulationError> {
        Self::calculate(&schedule.processes)
    }

    /// Time before `total_time` during which the CPU did no work.
    pub fn idle_time(&self) -> Ticks {
        self.total_time - self.total_burst
    }
}
