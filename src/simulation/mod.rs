//! Scheduling simulators.
//!
//! Each simulator takes ownership of a freshly cloned workload, runs it to
//! completion on one simulated CPU and returns a [`Schedule`].
//!
//! # Algorithms
//!
//! | Simulator | Preemptive | Time advance | Selection |
//! |-----------|-----------|--------------|-----------|
//! | [`FcfsSimulator`] | no | bulk jump | stable sort by arrival |
//! | [`SrtfSimulator`] | yes | unit tick | least remaining time |
//! | [`HrrnSimulator`] | no | per completion, unit idle tick | highest response ratio |
//!
//! Ties left by the selection rule go to the process that comes first in
//! the ready set, which keeps the workload's input order
//! ([`TieBreaker::InputOrder`]), unless a simulator is built with
//! [`TieBreaker::ById`].
//!
//! # Example
//!
//! ```
//! use cpu_schedule::models::{Algorithm, Process};
//! use cpu_schedule::simulation;
//! use cpu_schedule::dispatching::TieBreaker;
//!
//! let workload = vec![Process::new(1, 0, 5), Process::new(2, 1, 2)];
//! let schedule = simulation::run(Algorithm::Fcfs, &workload, TieBreaker::InputOrder).unwrap();
//! assert_eq!(schedule.process(2).unwrap().time_complete, Some(7));
//! // the caller's workload is untouched
//! assert!(workload[1].time_complete.is_none());
//! ```

mod clock;
mod fcfs;
mod hrrn;
mod srtf;

pub use clock::{horizon, Clock};
pub use fcfs::FcfsSimulator;
pub use hrrn::HrrnSimulator;
pub use srtf::SrtfSimulator;

use log::{debug, warn};
use serde::Serialize;

use crate::dispatching::{RuleEngine, TieBreaker};
use crate::error::SimulationError;
use crate::metrics::ScheduleMetrics;
use crate::models::{clone_workload, Algorithm, Process, Schedule};
use crate::validation::validate_workload;

/// A single-CPU scheduling simulator.
pub trait Simulator {
    /// Algorithm this simulator implements.
    fn algorithm(&self) -> Algorithm;

    /// Runs `processes` to completion.
    ///
    /// `processes` should be freshly cloned; the simulator owns and mutates
    /// them. Invalid workloads are rejected before any time passes.
    fn simulate(&self, processes: Vec<Process>) -> Result<Schedule, SimulationError>;
}

impl Algorithm {
    /// Builds the simulator for this algorithm.
    pub fn simulator(&self, tie_breaker: TieBreaker) -> Box<dyn Simulator> {
        match self {
            Algorithm::Fcfs => Box::new(FcfsSimulator::with_tie_breaker(tie_breaker)),
            Algorithm::Srtf => Box::new(SrtfSimulator::with_tie_breaker(tie_breaker)),
            Algorithm::Hrrn => Box::new(HrrnSimulator::with_tie_breaker(tie_breaker)),
        }
    }
}

/// One algorithm's schedule paired with its metrics.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationRun {
    /// The simulated schedule.
    pub schedule: Schedule,
    /// Metrics derived from the schedule.
    pub metrics: ScheduleMetrics,
}

/// Clones `workload` and simulates it under `algorithm`.
pub fn run(
    algorithm: Algorithm,
    workload: &[Process],
    tie_breaker: TieBreaker,
) -> Result<Schedule, SimulationError> {
    algorithm
        .simulator(tie_breaker)
        .simulate(clone_workload(workload))
}

/// Simulates `workload` under each algorithm, each on its own clone.
///
/// Fails on the first algorithm whose run or metrics fail.
pub fn compare(
    workload: &[Process],
    algorithms: &[Algorithm],
    tie_breaker: TieBreaker,
) -> Result<Vec<SimulationRun>, SimulationError> {
    algorithms
        .iter()
        .map(|&algorithm| {
            let schedule = run(algorithm, workload, tie_breaker)?;
            let metrics = ScheduleMetrics::from_schedule(&schedule)?;
            Ok(SimulationRun { schedule, metrics })
        })
        .collect()
}

/// Validates the workload and logs the start of a run.
fn begin_run(
    algorithm: Algorithm,
    engine: &RuleEngine,
    processes: &[Process],
) -> Result<(), SimulationError> {
    validate_workload(processes).map_err(|errors| {
        warn!(
            "{algorithm}: rejected workload of {} processes ({} problems)",
            processes.len(),
            errors.len()
        );
        SimulationError::InvalidWorkload(errors)
    })?;
    debug!(
        "{algorithm} ({}): {} processes, tie-break {}",
        algorithm.label(),
        processes.len(),
        engine.tie_breaker()
    );
    Ok(())
}

/// Moves finished processes out of the arena in `order`.
fn collect_in_order(arena: Vec<Process>, order: &[usize], schedule: &mut Schedule) {
    let mut slots: Vec<Option<Process>> = arena.into_iter().map(Some).collect();
    for &idx in order {
        if let Some(process) = slots[idx].take() {
            schedule.add_process(process);
        }
    }
}

fn log_finished(schedule: &Schedule, clock: &Clock) {
    debug!(
        "{}: {} processes finished at t={} of horizon {} ({} idle ticks, {} context switches)",
        schedule.algorithm,
        schedule.len(),
        clock.now(),
        clock.horizon(),
        clock.idle_ticks(),
        schedule.context_switches()
    );
}
