//! First-Come-First-Served simulator.
//!
//! # Algorithm
//!
//! 1. Stable-sort processes by arrival time (equal arrivals keep input order).
//! 2. For each process: if the CPU is ahead of the arrival, idle until it
//!    arrives; run the whole burst; record start and completion.
//!
//! # Complexity
//! O(n log n) for the sort, O(n) for the pass.

use log::trace;

use super::{begin_run, collect_in_order, log_finished, Clock, Simulator};
use crate::dispatching::{rules, RuleEngine, SchedulingContext, TieBreaker};
use crate::error::SimulationError;
use crate::models::{Algorithm, Process, Schedule};

/// Non-preemptive arrival-order simulator.
///
/// Output processes are in arrival-sorted order.
#[derive(Debug, Clone)]
pub struct FcfsSimulator {
    engine: RuleEngine,
}

impl FcfsSimulator {
    /// Creates a simulator that keeps input order for equal arrivals.
    pub fn new() -> Self {
        Self::with_tie_breaker(TieBreaker::InputOrder)
    }

    /// Creates a simulator with an explicit tie-break for equal arrivals.
    pub fn with_tie_breaker(tie_breaker: TieBreaker) -> Self {
        Self {
            engine: RuleEngine::new()
                .with_rule(rules::ArrivalOrder)
                .with_final_tie_breaker(tie_breaker),
        }
    }
}

impl Default for FcfsSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for FcfsSimulator {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Fcfs
    }

    fn simulate(&self, processes: Vec<Process>) -> Result<Schedule, SimulationError> {
        begin_run(Algorithm::Fcfs, &self.engine, &processes)?;

        let mut arena = processes;
        let mut clock = Clock::new(Algorithm::Fcfs, &arena);
        let mut schedule = Schedule::new(Algorithm::Fcfs);

        // Arrival order does not depend on time; the index sort is stable.
        let context = SchedulingContext::at_time(0);
        let all: Vec<usize> = (0..arena.len()).collect();
        let order = self.engine.sort_indices(&arena, &all, &context);

        for &idx in &order {
            let process = &mut arena[idx];
            if clock.now() < process.arrival_time {
                trace!(
                    "FCFS: idle t={}..{} waiting for process {}",
                    clock.now(),
                    process.arrival_time,
                    process.id
                );
                clock.idle_until(process.arrival_time)?;
            }

            let start = clock.now();
            clock.advance_by(process.burst_time)?;
            let end = clock.now();
            trace!("FCFS: process {} runs t={start}..{end}", process.id);

            process.time_start = Some(start);
            process.time_remaining = 0;
            process.time_complete = Some(end);
            schedule.record_execution(process.id, start, end);
        }

        log_finished(&schedule, &clock);
        collect_in_order(arena, &order, &mut schedule);
        Ok(schedule)
    }
}
