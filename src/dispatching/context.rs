//! Scheduling context for selection rule evaluation.

use crate::models::Ticks;

/// Runtime simulation state passed to selection rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulingContext {
    /// Current simulation time.
    pub current_time: Ticks,
}

impl SchedulingContext {
    /// Creates a context at the given time.
    pub fn at_time(current_time: Ticks) -> Self {
        Self { current_time }
    }
}
