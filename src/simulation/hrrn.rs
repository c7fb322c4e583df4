//! Highest-Response-Ratio-Next simulator (non-preemptive).
//!
//! # Algorithm
//!
//! Event-driven loop over an arena of owned processes. At each decision
//! time `t`:
//! 1. Ready set = unscheduled processes with `arrival_time <= t`, in input
//!    order.
//! 2. Pick the maximum of `(t - arrival + burst) / burst` (an `f64`,
//!    compared exactly) and run it to completion; `t` jumps to its
//!    completion time.
//! 3. No ready process: advance `t` by one idle tick.
//!
//! # Complexity
//! O(n^2) ratio evaluations in the worst case.
//!
//! # Reference
//! Brinch Hansen (1971), "Short-term Scheduling in Multiprogramming Systems"

use log::trace;

use super::{begin_run, collect_in_order, log_finished, Clock, Simulator};
use crate::dispatching::{rules, RuleEngine, SchedulingContext, TieBreaker};
use crate::error::SimulationError;
use crate::models::{Algorithm, Process, Schedule};

/// Non-preemptive response-ratio simulator.
///
/// Output processes are in completion order.
#[derive(Debug, Clone)]
pub struct HrrnSimulator {
    engine: RuleEngine,
}

impl HrrnSimulator {
    /// Creates a simulator that favours the earlier-listed process on ties.
    pub fn new() -> Self {
        Self::with_tie_breaker(TieBreaker::InputOrder)
    }

    /// Creates a simulator with an explicit tie-break for equal ratios.
    pub fn with_tie_breaker(tie_breaker: TieBreaker) -> Self {
        Self {
            engine: RuleEngine::new()
                .with_rule(rules::HighestResponseRatio)
                .with_epsilon(0.0)
                .with_final_tie_breaker(tie_breaker),
        }
    }
}

impl Default for HrrnSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for HrrnSimulator {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Hrrn
    }

    fn simulate(&self, processes: Vec<Process>) -> Result<Schedule, SimulationError> {
        begin_run(Algorithm::Hrrn, &self.engine, &processes)?;

        let mut arena = processes;
        let mut clock = Clock::new(Algorithm::Hrrn, &arena);
        let mut schedule = Schedule::new(Algorithm::Hrrn);
        let mut remaining: Vec<usize> = (0..arena.len()).collect();
        let mut completed: Vec<usize> = Vec::with_capacity(arena.len());

        while !remaining.is_empty() {
            let now = clock.now();
            let ready: Vec<usize> = remaining
                .iter()
                .copied()
                .filter(|&i| arena[i].is_ready_at(now))
                .collect();

            let context = SchedulingContext::at_time(now);
            let Some(idx) = self.engine.select_best(&arena, &ready, &context) else {
                trace!("HRRN: idle at t={now}");
                clock.idle_tick()?;
                continue;
            };

            let process = &mut arena[idx];
            let end = now + process.burst_time;
            trace!(
                "HRRN: t={now} picks process {} (ratio {:.3}, {} ready)",
                process.id,
                process.response_ratio(now),
                ready.len()
            );

            process.time_start = Some(now);
            process.time_remaining = 0;
            process.time_complete = Some(end);
            schedule.record_execution(process.id, now, end);
            remaining.retain(|&i| i != idx);
            completed.push(idx);

            clock.advance_by(end - now)?;
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
    fn test_hrrn_sample_schedule() {
        // t=5: ratios 2 -> 3.0, 3 -> 4.0, 4 -> 1.67, 5 -> 1.14 => 3
        // t=6: 2 -> 3.5, 4 -> 2.0, 5 -> 1.29 => 2
        // t=8: 4 -> 2.67, 5 -> 1.57 => 4
        let schedule = HrrnSimulator::new().simulate(sample()).unwrap();
        let ids: Vec<u32> = schedule.processes.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 2, 4, 5]);

        let spans: Vec<(i64, i64)> = schedule
            .processes
            .iter()
            .map(|p| (p.time_start.unwrap(), p.time_complete.unwrap()))
            .collect();
        assert_eq!(spans, vec![(0, 5), (5, 6), (6, 8), (8, 11), (11, 18)]);
    }

    #[test]
    fn test_hrrn_all_arrive_at_zero_never_idles() {
        let processes = vec![
            Process::new(1, 0, 9),
            Process::new(2, 0, 3),
            Process::new(3, 0, 5),
            Process::new(4, 0, 1),
        ];
        let total_burst: i64 = processes.iter().map(|p| p.burst_time).sum();
        let schedule = HrrnSimulator::new().simulate(processes).unwrap();

        assert_eq!(schedule.makespan(), total_burst);
        assert_eq!(schedule.idle_time(), 0);
        // t=0 is a four-way tie at ratio 1.0 -> first listed; then shortest first
        assert_eq!(schedule.completion_order(), vec![1, 4, 2, 3]);
    }

    #[test]
    fn test_hrrn_tie_breaker_by_id() {
        let processes = vec![Process::new(5, 0, 2), Process::new(1, 0, 2)];

        let input_order = HrrnSimulator::new().simulate(processes.clone()).unwrap();
        assert_eq!(input_order.completion_order(), vec![5, 1]);

        let by_id = HrrnSimulator::with_tie_breaker(TieBreaker::ById)
            .simulate(processes)
            .unwrap();
        assert_eq!(by_id.completion_order(), vec![1, 5]);
    }

    #[test]
    fn test_hrrn_long_wait_beats_short_job() {
        // t=10: long (arr 0, burst 5) -> 3.0; short (arr 9, burst 1) -> 2.0
        let processes = vec![
            Process::new(1, 0, 10),
            Process::new(2, 0, 5),
            Process::new(3, 9, 1),
        ];
        let schedule = HrrnSimulator::new().simulate(processes).unwrap();
        assert_eq!(schedule.completion_order(), vec![1, 2, 3]);
    }

    #[test]
    fn test_hrrn_tiny_ratio_gap_is_not_a_tie() {
        // t=1: p2 -> 100002/100001 ~ 1.0000099999, p3 -> 100001/100000 = 1.00001
        let processes = vec![
            Process::new(1, 0, 1),
            Process::new(2, 0, 100_001),
            Process::new(3, 0, 100_000),
        ];
        let schedule = HrrnSimulator::new().simulate(processes).unwrap();
        assert_eq!(schedule.completion_order(), vec![1, 3, 2]);
    }

    #[test]
    fn test_hrrn_idle_until_arrival() {
        let processes = vec![Process::new(1, 0, 1), Process::new(2, 4, 2)];
        let schedule = HrrnSimulator::new().simulate(processes).unwrap();
        let p2 = schedule.process(2).unwrap();
        assert_eq!(p2.time_start, Some(4));
        assert_eq!(p2.time_complete, Some(6));
        assert_eq!(schedule.idle_time(), 3);
    }

    #[test]
    fn test_hrrn_non_preemptive() {
        let schedule = HrrnSimulator::new().simulate(sample()).unwrap();
        for p in &schedule.processes {
            assert_eq!(schedule.slices_for(p.id).len(), 1);
            assert_eq!(
                p.time_complete.unwrap() - p.time_start.unwrap(),
                p.burst_time
            );
        }
    }
}
