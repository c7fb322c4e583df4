//! Command-line driver for the CPU scheduling simulator.
//!
//! Builds a workload (fixed sample, random, or all-at-zero), runs it through
//! the selected algorithms on independent copies and prints the metrics of
//! each run.
//!
//! ```text
//! cpu-schedule -w large -s 42 -a srtf -a hrrn --timeline
//! cpu-schedule -c sim.toml --json
//! cpu-schedule            # asks for S, L or E
//! ```

mod logger;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;

use cpu_schedule::config::SimulationConfig;
use cpu_schedule::dispatching::TieBreaker;
use cpu_schedule::models::{Algorithm, Ticks};
use cpu_schedule::report::{self, ReportOptions};
use cpu_schedule::simulation::{self, SimulationRun};
use cpu_schedule::workload::{seeded_rng, WorkloadKind};

/// Single-CPU scheduling simulator (FCFS, SRTF, HRRN)
#[derive(Parser, Debug)]
#[command(name = "cpu-schedule", version)]
#[command(about = "Simulate FCFS, SRTF and HRRN CPU scheduling", long_about = None)]
struct Args {
    /// Workload: small, large or edge (S, L, E). Prompts when omitted
    #[arg(short, long)]
    workload: Option<WorkloadKind>,

    /// Seed for the random workloads
    #[arg(short, long)]
    seed: Option<u64>,

    /// Algorithm to run; repeat to select several (default: all)
    #[arg(short = 'a', long = "algorithm")]
    algorithms: Vec<Algorithm>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tie-break for equal selection keys: input-order or by-id
    #[arg(long)]
    tie_breaker: Option<TieBreaker>,

    /// Number of generated processes
    #[arg(short = 'n', long)]
    process_count: Option<usize>,

    /// Exclusive upper bound on generated arrival times
    #[arg(long)]
    max_arrival: Option<Ticks>,

    /// Inclusive upper bound on generated burst times
    #[arg(long)]
    max_burst: Option<Ticks>,

    /// Print a per-process table after each run
    #[arg(long, default_value_t = false)]
    table: bool,

    /// Print the CPU timeline after each run
    #[arg(long, default_value_t = false)]
    timeline: bool,

    /// Print one JSON document instead of text
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// File settings (or defaults) with command-line values on top.
    fn resolve_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if let Some(kind) = self.workload {
            config.workload = Some(kind);
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if !self.algorithms.is_empty() {
            config.algorithms = self.algorithms.clone();
        }
        if let Some(tie_breaker) = self.tie_breaker {
            config.tie_breaker = tie_breaker;
        }
        if let Some(count) = self.process_count {
            config.process_count = count;
        }
        if let Some(max_arrival) = self.max_arrival {
            config.max_arrival = max_arrival;
        }
        if let Some(max_burst) = self.max_burst {
            config.max_burst = max_burst;
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    workload: WorkloadKind,
    seed: Option<u64>,
    tie_breaker: TieBreaker,
    runs: &'a [SimulationRun],
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(logger::level_for(args.verbose)).map_err(|e| anyhow!("{e}"))?;

    let config = args.resolve_config()?;
    let kind = match config.workload {
        Some(kind) => kind,
        None => prompt_workload(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let (mut rng, seed) = seeded_rng(config.seed);
    if kind.is_random() {
        info!("workload seed: {seed}");
    }
    let workload = config.generator().generate(kind, &mut rng);

    let runs = simulation::compare(workload.processes(), &config.algorithms, config.tie_breaker)
        .context("simulation failed")?;

    let mut stdout = io::stdout().lock();
    if args.json {
        let doc = JsonReport {
            workload: kind,
            seed: kind.is_random().then_some(seed),
            tie_breaker: config.tie_breaker,
            runs: &runs,
        };
        serde_json::to_writer_pretty(&mut stdout, &doc).context("writing JSON report")?;
        writeln!(stdout)?;
    } else {
        let options = ReportOptions {
            processes: args.table,
            timeline: args.timeline,
        };
        write!(stdout, "{}", report::render_all(&runs, kind, options))?;
    }
    Ok(())
}

/// Asks for `S`, `L` or `E` until a valid answer arrives.
fn prompt_workload(input: &mut impl BufRead, output: &mut impl Write) -> Result<WorkloadKind> {
    loop {
        writeln!(
            output,
            "What kind of load would you like to test? Enter 'S' for small, 'L' for large, or 'E' for edge cases : "
        )?;
        output.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer).context("reading answer")? == 0 {
            bail!("no workload selected");
        }
        match WorkloadKind::from_answer(&answer) {
            Some(kind) => return Ok(kind),
            None => writeln!(output, "Please enter a valid answer.")?,
        }
    }
}
