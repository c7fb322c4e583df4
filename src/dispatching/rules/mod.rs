//! Built-in selection rules.
//!
//! | Rule | Key | Used by |
//! |------|-----|---------|
//! | [`ArrivalOrder`] | earliest `arrival_time` | FCFS |
//! | [`ShortestRemaining`] | least `time_remaining` | SRTF |
//! | [`HighestResponseRatio`] | largest `(wait + burst) / burst` | HRRN |
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.
//!
//! # References
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Brinch Hansen (1971), "Short-term Scheduling in Multiprogramming Systems"

use super::{RuleScore, SchedulingContext, SelectionRule};
use crate::models::Process;

/// First come, first served.
///
/// Prioritizes processes that arrived earlier.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalOrder;

impl SelectionRule for ArrivalOrder {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn evaluate(&self, process: &Process, _context: &SchedulingContext) -> RuleScore {
        process.arrival_time as f64
    }

    fn description(&self) -> &'static str {
        "First Come First Served"
    }
}

/// Shortest remaining time.
///
/// Prioritizes the process closest to completion. With preemption this
/// minimizes mean waiting time on a single CPU.
///
/// # Reference
/// Schrage (1968), "A Proof of the Optimality of the Shortest Remaining
/// Processing Time Discipline"
#[derive(Debug, Clone, Copy)]
pub struct ShortestRemaining;

impl SelectionRule for ShortestRemaining {
    fn name(&self) -> &'static str {
        "SRT"
    }

    fn evaluate(&self, process: &Process, _context: &SchedulingContext) -> RuleScore {
        process.time_remaining as f64
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time"
    }
}

/// Highest response ratio.
///
/// Ratio = (time waited + burst) / burst. Short processes are favoured,
/// but a long process's ratio keeps growing while it waits, so it cannot
/// starve.
///
/// # Reference
/// Brinch Hansen (1971), "Short-term Scheduling in Multiprogramming Systems"
#[derive(Debug, Clone, Copy)]
pub struct HighestResponseRatio;

impl SelectionRule for HighestResponseRatio {
    fn name(&self) -> &'static str {
        "HRR"
    }

    fn evaluate(&self, process: &Process, context: &SchedulingContext) -> RuleScore {
        -process.response_ratio(context.current_time) // Higher ratio = higher priority → negate
    }

    fn description(&self) -> &'static str {
        "Highest Response Ratio"
    }
}
