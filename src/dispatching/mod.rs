//! Selection rules and rule engine for ready-set dispatching.
//!
//! Every simulator reduces "which process runs next" to ranking the ready
//! set with one or more rules (arrival order, shortest remaining time,
//! highest response ratio) and resolving exact ties with an explicit
//! [`TieBreaker`].
//!
//! # Usage
//!
//! ```
//! use cpu_schedule::dispatching::{rules, RuleEngine, SchedulingContext};
//! use cpu_schedule::models::Process;
//!
//! let processes = vec![Process::new(1, 0, 5), Process::new(2, 0, 2)];
//! let engine = RuleEngine::new().with_rule(rules::ShortestRemaining);
//!
//! let context = SchedulingContext::at_time(0);
//! assert_eq!(engine.select_best(&processes, &[0, 1], &context), Some(1));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Brinch Hansen (1971), "Short-term Scheduling in Multiprogramming Systems"

mod context;
mod engine;
pub mod rules;

pub use context::SchedulingContext;
pub use engine::{RuleEngine, TieBreaker};

use crate::models::Process;
use std::fmt::Debug;

/// Score returned by a selection rule.
///
/// Lower scores = higher priority (selected first).
pub type RuleScore = f64;

/// A selection rule that ranks ready processes.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules that favour large values
/// (e.g., response ratio) return the negated value.
pub trait SelectionRule: Send + Sync + Debug {
    /// Rule name (e.g., "SRT", "HRR").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a process at the current simulation time.
    ///
    /// Returns a score where lower = higher priority.
    fn evaluate(&self, process: &Process, context: &SchedulingContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
