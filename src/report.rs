//! Text rendering of simulation results.
//!
//! Produces the plain-text report printed by the binary: a heading per
//! algorithm, the metric lines, and optionally a per-process table and the
//! CPU timeline.
//!
//! ```text
//! FCFS Sim (small load):
//! Average waiting time is : 4.2 sec
//! Average response time is : 4.2 sec
//! Average turnaround time is : 7.8 sec
//!
//! CPU Utilization was : 100%
//! Throughput : 0.2777777777777778 processes / unit time
//! ```

use std::fmt::{self, Write};

use crate::metrics::ScheduleMetrics;
use crate::models::{Algorithm, Schedule};
use crate::simulation::SimulationRun;
use crate::workload::WorkloadKind;

/// Which optional sections to include.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Per-process table.
    pub processes: bool,
    /// CPU timeline.
    pub timeline: bool,
}

/// Heading line, e.g. `SRTF Sim (edge cases):`.
pub fn heading(algorithm: Algorithm, kind: WorkloadKind) -> String {
    format!("{} Sim ({}):", algorithm.name(), kind.label())
}

/// Writes the averaged metric lines.
pub fn write_metrics(out: &mut impl Write, metrics: &ScheduleMetrics) -> fmt::Result {
    writeln!(out, "Average waiting time is : {} sec", metrics.avg_waiting_time)?;
    writeln!(out, "Average response time is : {} sec", metrics.avg_response_time)?;
    writeln!(out, "Average turnaround time is : {} sec", metrics.avg_turnaround_time)?;
    writeln!(out)?;
    writeln!(out, "CPU Utilization was : {}%", metrics.cpu_utilization)?;
    writeln!(out, "Throughput : {} processes / unit time", metrics.throughput)
}

/// Writes one row per process in the schedule's output order.
pub fn write_process_table(out: &mut impl Write, schedule: &Schedule) -> fmt::Result {
    writeln!(
        out,
        "{:>5} {:>8} {:>6} {:>6} {:>9} {:>8} {:>8} {:>10}",
        "PID", "Arrival", "Burst", "Start", "Complete", "Waiting", "Response", "Turnaround"
    )?;
    for p in &schedule.processes {
        writeln!(
            out,
            "{:>5} {:>8} {:>6} {:>6} {:>9} {:>8} {:>8} {:>10}",
            p.id,
            p.arrival_time,
            p.burst_time,
            display_opt(p.time_start),
            display_opt(p.time_complete),
            display_opt(p.waiting_time()),
            display_opt(p.response_time()),
            display_opt(p.turnaround_time()),
        )?;
    }
    Ok(())
}

/// Writes the CPU timeline as `[start, end) P<id>` lines, marking idle gaps.
pub fn write_timeline(out: &mut impl Write, schedule: &Schedule) -> fmt::Result {
    let mut cursor = 0;
    for slice in &schedule.slices {
        if slice.start > cursor {
            writeln!(out, "[{cursor}, {}) idle", slice.start)?;
        }
        writeln!(out, "[{}, {}) P{}", slice.start, slice.end, slice.process_id)?;
        cursor = slice.end;
    }
    writeln!(
        out,
        "{} context switches, {} idle ticks",
        schedule.context_switches(),
        schedule.idle_time()
    )
}

/// One run's text report: heading, metrics and the requested optional
/// sections.
#[derive(Debug, Clone, Copy)]
pub struct RunReport<'a> {
    /// The run to render.
    pub run: &'a SimulationRun,
    /// Workload label used in the heading.
    pub kind: WorkloadKind,
    /// Optional sections.
    pub options: ReportOptions,
}

impl fmt::Display for RunReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", heading(self.run.schedule.algorithm, self.kind))?;
        write_metrics(f, &self.run.metrics)?;
        if self.options.processes {
            writeln!(f)?;
            write_process_table(f, &self.run.schedule)?;
        }
        if self.options.timeline {
            writeln!(f)?;
            write_timeline(f, &self.run.schedule)?;
        }
        Ok(())
    }
}

/// Renders one run.
pub fn render_run(run: &SimulationRun, kind: WorkloadKind, options: ReportOptions) -> String {
    RunReport { run, kind, options }.to_string()
}

/// Renders every run, separated by blank lines.
pub fn render_all(runs: &[SimulationRun], kind: WorkloadKind, options: ReportOptions) -> String {
    runs.iter()
        .map(|run| render_run(run, kind, options))
        .collect::<Vec<_>>()
        .join("\n")
}

fn display_opt(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
