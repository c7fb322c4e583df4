//! Logical simulation clock.
//!
//! Time advances either one tick at a time (SRTF, HRRN idle ticks) or in
//! bulk jumps (FCFS idle gaps, non-preemptive bursts). Every advance is
//! checked against the workload's horizon: a single CPU that never idles
//! while work is waiting finishes by `max(arrival) + sum(burst)`, so a
//! clock that passes that point is stuck in a loop that is not making
//! progress.

use crate::error::SimulationError;
use crate::models::{Algorithm, Process, Ticks};

/// Latest possible makespan of a work-conserving schedule of `processes`.
///
/// Saturates at `Ticks::MAX`; validated workloads never get that far.
pub fn horizon(processes: &[Process]) -> Ticks {
    let last_arrival = processes
        .iter()
        .map(|p| p.arrival_time)
        .max()
        .unwrap_or(0);
    processes
        .iter()
        .fold(last_arrival, |acc, p| acc.saturating_add(p.burst_time))
}

/// A bounded logical clock owned by one simulator run.
#[derive(Debug, Clone)]
pub struct Clock {
    algorithm: Algorithm,
    now: Ticks,
    horizon: Ticks,
    idle_ticks: Ticks,
}

impl Clock {
    /// Creates a clock at t=0, bounded by the horizon of `processes`.
    pub fn new(algorithm: Algorithm, processes: &[Process]) -> Self {
        Self::with_horizon(algorithm, horizon(processes))
    }

    /// Creates a clock at t=0 with an explicit horizon.
    pub fn with_horizon(algorithm: Algorithm, horizon: Ticks) -> Self {
        Self {
            algorithm,
            now: 0,
            horizon,
            idle_ticks: 0,
        }
    }

    /// Current simulation time.
    #[inline]
    pub fn now(&self) -> Ticks {
        self.now
    }

    /// The bound this clock enforces.
    pub fn horizon(&self) -> Ticks {
        self.horizon
    }

    /// Time spent idle so far.
    pub fn idle_ticks(&self) -> Ticks {
        self.idle_ticks
    }

    /// Advances by one tick of execution.
    pub fn tick(&mut self) -> Result<(), SimulationError> {
        self.advance_by(1)
    }

    /// Advances by one tick with the CPU idle.
    pub fn idle_tick(&mut self) -> Result<(), SimulationError> {
        self.idle_ticks = self.idle_ticks.saturating_add(1);
        self.advance_by(1)
    }

    /// Advances by `delta` ticks of execution.
    ///
    /// A step that would overflow `Ticks` is reported as passing the horizon.
    pub fn advance_by(&mut self, delta: Ticks) -> Result<(), SimulationError> {
        let Some(next) = self.now.checked_add(delta) else {
            return Err(self.stalled_at(Ticks::MAX));
        };
        self.now = next;
        self.check()
    }

    /// Jumps forward to `time`, counting the gap as idle. Never moves back.
    pub fn idle_until(&mut self, time: Ticks) -> Result<(), SimulationError> {
        if time > self.now {
            self.idle_ticks = self.idle_ticks.saturating_add(time - self.now);
            self.now = time;
        }
        self.check()
    }

    fn stalled_at(&self, time: Ticks) -> SimulationError {
        SimulationError::Stalled {
            algorithm: self.algorithm,
            time,
            horizon: self.horizon,
        }
    }

    fn check(&self) -> Result<(), SimulationError> {
        if self.now > self.horizon {
            return Err(self.stalled_at(self.now));
        }
        Ok(())
    }
}
