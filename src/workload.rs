//! Workload providers.
//!
//! The simulators only consume an ordered list of `(id, arrival, burst)`
//! records; this module produces those lists: the fixed five-process
//! sample and two seedable random shapes.
//!
//! | Kind | Shape |
//! |------|-------|
//! | Small | fixed sample `[(1,0,5),(2,1,2),(3,2,1),(4,3,3),(5,4,7)]` |
//! | Large | `count` processes, arrival in `[0, max_arrival)`, burst in `[1, max_burst]` |
//! | Edge | same bursts as Large, every arrival at 0 |
//!
//! # Example
//!
//! ```
//! use cpu_schedule::workload::{WorkloadGenerator, WorkloadKind};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let generator = WorkloadGenerator::default();
//! let mut rng = StdRng::seed_from_u64(42);
//! let workload = generator.generate(WorkloadKind::Edge, &mut rng);
//! assert_eq!(workload.len(), 50);
//! assert!(workload.processes().iter().all(|p| p.arrival_time == 0));
//! ```

use std::fmt;
use std::str::FromStr;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{clone_workload, Process, Ticks};

/// Default number of generated processes.
pub const DEFAULT_PROCESS_COUNT: usize = 50;
/// Default exclusive upper bound on generated arrival times.
pub const DEFAULT_MAX_ARRIVAL: Ticks = 50;
/// Default inclusive upper bound on generated burst times.
pub const DEFAULT_MAX_BURST: Ticks = 50;

/// Which workload shape to simulate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadKind {
    /// The fixed five-process sample.
    #[default]
    Small,
    /// Randomized arrivals and bursts.
    Large,
    /// Randomized bursts, all arriving at t=0.
    Edge,
}

impl WorkloadKind {
    /// Parses the one-letter answer of the interactive prompt (`S`, `L`, `E`).
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer.trim() {
            "S" | "s" => Some(WorkloadKind::Small),
            "L" | "l" => Some(WorkloadKind::Large),
            "E" | "e" => Some(WorkloadKind::Edge),
            _ => None,
        }
    }

    /// Human-readable label used in report headings.
    pub fn label(&self) -> &'static str {
        match self {
            WorkloadKind::Small => "small load",
            WorkloadKind::Large => "large load",
            WorkloadKind::Edge => "edge cases",
        }
    }

    /// Whether generating this kind consumes random numbers.
    pub fn is_random(&self) -> bool {
        !matches!(self, WorkloadKind::Small)
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WorkloadKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(kind) = Self::from_answer(s) {
            return Ok(kind);
        }
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(WorkloadKind::Small),
            "large" => Ok(WorkloadKind::Large),
            "edge" => Ok(WorkloadKind::Edge),
            other => Err(format!(
                "unknown workload '{other}' (expected small, large or edge)"
            )),
        }
    }
}

/// An ordered set of unscheduled processes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    processes: Vec<Process>,
}

impl Workload {
    /// Wraps a list of processes.
    pub fn new(processes: Vec<Process>) -> Self {
        Self { processes }
    }

    /// The fixed five-process sample.
    pub fn sample() -> Self {
        Self::new(vec![
            Process::new(1, 0, 5),
            Process::new(2, 1, 2),
            Process::new(3, 2, 1),
            Process::new(4, 3, 3),
            Process::new(5, 4, 7),
        ])
    }

    /// The processes, in provider order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Consumes the workload.
    pub fn into_processes(self) -> Vec<Process> {
        self.processes
    }

    /// An independent, freshly reset copy for one simulator run.
    pub fn fresh_copy(&self) -> Vec<Process> {
        clone_workload(&self.processes)
    }

    /// Number of processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether the workload has no processes.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Sum of burst times.
    pub fn total_burst(&self) -> Ticks {
        self.processes.iter().map(|p| p.burst_time).sum()
    }
}

/// Error for generator bounds that cannot produce a valid workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidGenerator(pub String);

impl fmt::Display for InvalidGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid workload generator: {}", self.0)
    }
}

impl std::error::Error for InvalidGenerator {}

/// Random workload generator.
///
/// Process IDs are `1..=count`. Each process draws its burst first and its
/// arrival second, so the Large and Edge shapes produced from equally
/// seeded generators share the same bursts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadGenerator {
    /// Number of processes.
    pub count: usize,
    /// Exclusive upper bound on arrival times.
    pub max_arrival: Ticks,
    /// Inclusive upper bound on burst times.
    pub max_burst: Ticks,
}

impl Default for WorkloadGenerator {
    fn default() -> Self {
        Self {
            count: DEFAULT_PROCESS_COUNT,
            max_arrival: DEFAULT_MAX_ARRIVAL,
            max_burst: DEFAULT_MAX_BURST,
        }
    }
}

impl WorkloadGenerator {
    /// Creates a generator, checking that its ranges are non-empty.
    pub fn new(count: usize, max_arrival: Ticks, max_burst: Ticks) -> Result<Self, InvalidGenerator> {
        let generator = Self {
            count,
            max_arrival,
            max_burst,
        };
        generator.check()?;
        Ok(generator)
    }

    /// Checks that arrival and burst ranges are non-empty.
    pub fn check(&self) -> Result<(), InvalidGenerator> {
        if self.max_arrival < 1 {
            return Err(InvalidGenerator(format!(
                "max_arrival must be at least 1, got {}",
                self.max_arrival
            )));
        }
        if self.max_burst < 1 {
            return Err(InvalidGenerator(format!(
                "max_burst must be at least 1, got {}",
                self.max_burst
            )));
        }
        Ok(())
    }

    /// Random arrivals and bursts.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Workload {
        self.draw(rng, false)
    }

    /// Random bursts with every process arriving at t=0.
    pub fn simultaneous<R: Rng>(&self, rng: &mut R) -> Workload {
        self.draw(rng, true)
    }

    /// Produces the workload for `kind`.
    pub fn generate<R: Rng>(&self, kind: WorkloadKind, rng: &mut R) -> Workload {
        let workload = match kind {
            WorkloadKind::Small => Workload::sample(),
            WorkloadKind::Large => self.random(rng),
            WorkloadKind::Edge => self.simultaneous(rng),
        };
        debug!(
            "generated {} workload: {} processes, {} total burst",
            kind,
            workload.len(),
            workload.total_burst()
        );
        workload
    }

    fn draw<R: Rng>(&self, rng: &mut R, all_at_zero: bool) -> Workload {
        let processes = (1..=self.count)
            .map(|id| {
                let burst = rng.random_range(1..=self.max_burst);
                let arrival = rng.random_range(0..self.max_arrival);
                let arrival = if all_at_zero { 0 } else { arrival };
                Process::new(id as u32, arrival, burst)
            })
            .collect();
        Workload::new(processes)
    }
}

/// Builds a seeded RNG, choosing a fresh seed when none is given.
///
/// Returns the seed actually used so a run can be reproduced.
pub fn seeded_rng(seed: Option<u64>) -> (StdRng, u64) {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    (StdRng::seed_from_u64(seed), seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_workload;

    #[test]
    fn test_sample() {
        let w = Workload::sample();
        assert_eq!(w.len(), 5);
        assert_eq!(w.total_burst(), 18);
        assert_eq!(w.processes()[2], Process::new(3, 2, 1));
    }

    #[test]
    fn test_random_within_bounds() {
        let generator = WorkloadGenerator::new(200, 10, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let w = generator.random(&mut rng);
        assert_eq!(w.len(), 200);
        assert!(validate_workload(w.processes()).is_ok());
        for (i, p) in w.processes().iter().enumerate() {
            assert_eq!(p.id, i as u32 + 1);
            assert!((0..10).contains(&p.arrival_time));
            assert!((1..=4).contains(&p.burst_time));
            assert_eq!(p.time_remaining, p.burst_time);
        }
    }

    #[test]
    fn test_same_seed_same_workload() {
        let generator = WorkloadGenerator::default();
        let a = generator.random(&mut StdRng::seed_from_u64(99));
        let b = generator.random(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_edge_shares_bursts_with_large() {
        let generator = WorkloadGenerator::default();
        let large = generator.random(&mut StdRng::seed_from_u64(5));
        let edge = generator.simultaneous(&mut StdRng::seed_from_u64(5));

        assert!(edge.processes().iter().all(|p| p.arrival_time == 0));
        let large_bursts: Vec<i64> = large.processes().iter().map(|p| p.burst_time).collect();
        let edge_bursts: Vec<i64> = edge.processes().iter().map(|p| p.burst_time).collect();
        assert_eq!(large_bursts, edge_bursts);
    }

    #[test]
    fn test_generate_small_ignores_rng() {
        let generator = WorkloadGenerator::default();
        let w = generator.generate(WorkloadKind::Small, &mut StdRng::seed_from_u64(0));
        assert_eq!(w, Workload::sample());
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(WorkloadGenerator::new(10, 0, 5).is_err());
        assert!(WorkloadGenerator::new(10, 5, 0).is_err());
        assert!(WorkloadGenerator::new(0, 1, 1).is_ok());
    }

    #[test]
    fn test_fresh_copy_is_independent() {
        let w = Workload::sample();
        let mut copy = w.fresh_copy();
        copy[0].time_remaining = 0;
        assert_eq!(w.processes()[0].time_remaining, 5);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(WorkloadKind::from_answer("S"), Some(WorkloadKind::Small));
        assert_eq!(WorkloadKind::from_answer(" L\n"), Some(WorkloadKind::Large));
        assert_eq!(WorkloadKind::from_answer("X"), None);
        assert_eq!("edge".parse::<WorkloadKind>().unwrap(), WorkloadKind::Edge);
        assert_eq!("E".parse::<WorkloadKind>().unwrap(), WorkloadKind::Edge);
        assert!("medium".parse::<WorkloadKind>().is_err());
        assert!(WorkloadKind::Large.is_random());
        assert!(!WorkloadKind::Small.is_random());
    }

    #[test]
    fn test_seeded_rng_reports_seed() {
        let (mut a, seed) = seeded_rng(Some(17));
        assert_eq!(seed, 17);
        let (mut b, _) = seeded_rng(Some(17));
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }
}
