//! Single-CPU process scheduling simulator.
//!
//! Runs a workload of processes (id, arrival time, burst time) through a
//! simulated CPU under one of three classic policies and reports how each
//! one performs.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `Algorithm`, `Schedule`,
//!   `ExecutionSlice`
//! - **`dispatching`**: Selection rules (arrival order, shortest remaining,
//!   highest response ratio) and the `RuleEngine` that applies them with a
//!   deterministic tie-break
//! - **`simulation`**: FCFS, SRTF and HRRN simulators plus `run`/`compare`
//! - **`metrics`**: Waiting, response and turnaround averages, CPU
//!   utilization, throughput
//! - **`workload`**: The fixed sample and seedable random workloads
//! - **`validation`**: Input integrity checks (burst, arrival, duplicate IDs)
//! - **`config`**: TOML-loadable run settings
//! - **`report`**: Text rendering of simulation results
//!
//! # Example
//!
//! ```
//! use cpu_schedule::dispatching::TieBreaker;
//! use cpu_schedule::models::Algorithm;
//! use cpu_schedule::simulation;
//! use cpu_schedule::workload::Workload;
//!
//! let workload = Workload::sample();
//! let runs = simulation::compare(workload.processes(), &Algorithm::ALL, TieBreaker::InputOrder).unwrap();
//! let srtf = &runs[1];
//! assert_eq!(srtf.schedule.algorithm, Algorithm::Srtf);
//! assert!((srtf.metrics.avg_waiting_time - 3.0).abs() < 1e-10);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin, Gagne (2018), "Operating System Concepts", Ch. 5
//! - Stallings (2018), "Operating Systems: Internals and Design Principles", Ch. 9

pub mod config;
pub mod dispatching;
pub mod error;
pub mod metrics;
pub mod models;
pub mod report;
pub mod simulation;
pub mod validation;
pub mod workload;

pub use error::SimulationError;
pub use metrics::ScheduleMetrics;
pub use simulation::{SimulationRun, Simulator};
