//! Shortest-Remaining-Time-First simulator (preemptive).
//!
//! # Algorithm
//!
//! Unit-tick loop over an arena of owned processes:
//! 1. Ready set = unfinished processes with `arrival_time <= now`, in
//!    input order.
//! 2. Pick the ready process with the least `time_remaining` and run it
//!    for one tick; a newly arrived shorter process takes over at the next
//!    tick boundary.
//! 3. No ready process: the CPU idles for the tick.
//!
//! # Complexity
//! O(n * T) where T is the makespan.
//!
//! # Reference
//! Schrage (1968), "A Proof of the Optimality of the Shortest Remaining
//! Processing Time Discipline"

use log::trace;

use super::{begin_run, collect_in_order, log_finished, Clock, Simulator};
use crate::dispatching::{rules, RuleEngine, SchedulingContext, TieBreaker};
use crate::error::SimulationError;
use crate::models::{Algorithm, Process, Schedule};

/// Preemptive shortest-remaining-time simulator.
///
/// Output processes are in completion order.
#[derive(Debug, Clone)]
pub struct SrtfSimulator {
    engine: RuleEngine,
}

impl SrtfSimulator {
    /// Creates a simulator that favours the earlier-listed process on ties.
    pub fn new() -> Self {
        Self::with_tie_breaker(TieBreaker::InputOrder)
    }

    /// Creates a simulator with an explicit tie-break for equal remaining time.
    pub fn with_tie_breaker(tie_breaker: TieBreaker) -> Self {
        Self {
            engine: RuleEngine::new()
                .with_rule(rules::ShortestRemaining)
                .with_final_tie_breaker(tie_breaker),
        }
    }
}

impl Default for SrtfSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for SrtfSimulator {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Srtf
    }

    fn simulate(&self, processes: Vec<Process>) -> Result<Schedule, SimulationError> {
        begin_run(Algorithm::Srtf, &self.engine, &processes)?;

        let mut arena = processes;
        let mut clock = Clock::new(Algorithm::Srtf, &arena);
        let mut schedule = Schedule::new(Algorithm::Srtf);
        let mut remaining: Vec<usize> = (0..arena.len()).collect();
        let mut completed: Vec<usize> = Vec::with_capacity(arena.len());
        let mut last_run: Option<usize> = None;

        while !remaining.is_empty() {
            let now = clock.now();
            let ready: Vec<usize> = remaining
                .iter()
                .copied()
                .filter(|&i| arena[i].is_ready_at(now))
                .collect();

            let context = SchedulingContext::at_time(now);
            let Some(idx) = self.engine.select_best(&arena, &ready, &context) else {
                trace!("SRTF: idle at t={now}");
                last_run = None;
                clock.idle_tick()?;
                continue;
            };

            if let Some(prev) = last_run {
                if prev != idx && remaining.contains(&prev) {
                    trace!(
                        "SRTF: t={now} process {} preempts process {} ({} left)",
                        arena[idx].id,
                        arena[prev].id,
                        arena[prev].time_remaining
                    );
                }
            }

            let process = &mut arena[idx];
            if process.time_start.is_none() {
                process.time_start = Some(now);
            }
            process.time_remaining -= 1;
            schedule.record_execution(process.id, now, now + 1);

            if process.time_remaining == 0 {
                process.time_complete = Some(now + 1);
                trace!("SRTF: process {} completes at t={}", process.id, now + 1);
                remaining.retain(|&i| i != idx);
                completed.push(idx);
            }

            last_run = Some(idx);
            clock.tick()?;
        }

        log_finished(&schedule, &clock);
        collect_in_order(arena, &completed, &mut schedule);
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Process> {
        vec![
            Process::new(1, 0, 5),
            Process::new(2, 1, 2),
            Process::new(3, 2, 1),
            Process::new(4, 3, 3),
            Process::new(5, 4, 7),
        ]
    }

    #[test]
    fn test_srtf_sample_schedule() {
        let schedule = SrtfSimulator::new().simulate(sample()).unwrap();
        assert_eq!(schedule.completion_order(), vec![2, 3, 4, 1, 5]);

        let ids: Vec<u32> = schedule.processes.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3, 4, 1, 5]);

        let complete = |id| schedule.process(id).unwrap().time_complete.unwrap();
        assert_eq!(complete(1), 11);
        assert_eq!(complete(2), 3);
        assert_eq!(complete(4), 7);
        assert_eq!(complete(5), 18);
    }

    #[test]
    fn test_srtf_short_arrival_finishes_before_long_runner() {
        // At t=2 processes 2 and 3 both have 1 tick left; process 2 is
        // listed first and wins, process 3 follows at t=3.
        let schedule = SrtfSimulator::new().simulate(sample()).unwrap();
        let p1 = schedule.process(1).unwrap();
        let p3 = schedule.process(3).unwrap();
        assert_eq!(p3.time_start, Some(3));
        assert_eq!(p3.time_complete, Some(4));
        assert!(p3.time_complete < p1.time_complete);
    }

    #[test]
    fn test_srtf_preemption_timeline() {
        let schedule = SrtfSimulator::new().simulate(sample()).unwrap();
        let timeline: Vec<(u32, i64, i64)> = schedule
            .slices
            .iter()
            .map(|s| (s.process_id, s.start, s.end))
            .collect();
        assert_eq!(
            timeline,
            vec![(1, 0, 1), (2, 1, 3), (3, 3, 4), (4, 4, 7), (1, 7, 11), (5, 11, 18)]
        );
        assert_eq!(schedule.context_switches(), 5);
        // process 1 started at 0 even though it finished much later
        assert_eq!(schedule.process(1).unwrap().time_start, Some(0));
    }

    #[test]
    fn test_srtf_tie_breaker_by_id() {
        let processes = vec![Process::new(8, 0, 2), Process::new(4, 0, 2)];

        let input_order = SrtfSimulator::new().simulate(processes.clone()).unwrap();
        assert_eq!(input_order.completion_order(), vec![8, 4]);

        let by_id = SrtfSimulator::with_tie_breaker(TieBreaker::ById)
            .simulate(processes)
            .unwrap();
        assert_eq!(by_id.completion_order(), vec![4, 8]);
    }

    #[test]
    fn test_srtf_running_process_keeps_cpu_on_equal_newcomer() {
        // Process 1 has 2 left at t=2 when process 2 (burst 2) arrives:
        // equal remaining time does not preempt the earlier-listed process.
        let processes = vec![Process::new(1, 0, 4), Process::new(2, 2, 2)];
        let schedule = SrtfSimulator::new().simulate(processes).unwrap();
        assert_eq!(schedule.process(1).unwrap().time_complete, Some(4));
        assert_eq!(schedule.process(2).unwrap().time_start, Some(4));
    }

    #[test]
    fn test_srtf_idle_ticks() {
        let processes = vec![Process::new(1, 3, 2)];
        let schedule = SrtfSimulator::new().simulate(processes).unwrap();
        let p = schedule.process(1).unwrap();
        assert_eq!(p.time_start, Some(3));
        assert_eq!(p.time_complete, Some(5));
        assert_eq!(schedule.idle_time(), 3);
    }

    #[test]
    fn test_srtf_all_at_zero_is_shortest_first() {
        let processes = vec![
            Process::new(1, 0, 6),
            Process::new(2, 0, 2),
            Process::new(3, 0, 4),
        ];
        let schedule = SrtfSimulator::new().simulate(processes).unwrap();
        assert_eq!(schedule.completion_order(), vec![2, 3, 1]);
        assert_eq!(schedule.makespan(), 12);
        assert_eq!(schedule.context_switches(), 2);
    }
}
