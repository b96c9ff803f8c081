/*!
 * probsched - Command Line Entry Point
 *
 * Produces a workload (file, static or seeded random), runs one scheduling
 * policy over it and reports:
 * - Per-process table and aggregate metrics
 * - Optional Gantt CSV for external plotting
 * - Optional JSON output of the full outcome
 */

use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::PathBuf;
use tracing::{info, warn};

use probsched::core::limits::{
    CONTEXT_SWITCH_COST, DEFAULT_BURST_MEAN, DEFAULT_BURST_STDDEV, DEFAULT_LAMBDA,
    DEFAULT_PROCESS_COUNT,
};
use probsched::scheduler::{utilization, utilization_bound};
use probsched::simulation::IoModelConfig;
use probsched::workload::{BurstDistribution, IoProfile, PriorityDistribution};
use probsched::{
    generate_static, init_tracing, load_workload, IoTiming, Policy, ProcessRecord, RandomWorkload,
    Simulation, SimulationConfig, Tick, TimeCap,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GenMode {
    Static,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum BurstDist {
    #[default]
    Normal,
    Uniform,
    Exponential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum PrioDist {
    #[default]
    Uniform,
    Biased,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum IoTimingArg {
    AfterBurst,
    MidBurst,
}

impl From<IoTimingArg> for IoTiming {
    fn from(arg: IoTimingArg) -> Self {
        match arg {
            IoTimingArg::AfterBurst => IoTiming::AfterBurst,
            IoTimingArg::MidBurst => IoTiming::MidBurst,
        }
    }
}

/// Probabilistic CPU scheduling simulator
#[derive(Parser, Debug)]
#[command(name = "probsched", version)]
#[command(about = "Simulate CPU scheduling policies over generated or file workloads", long_about = None)]
struct Cli {
    /// Scheduling policy: fcfs, sjf, rr, prio-np, prio-p, edf, rm, mlq
    #[arg(short, long, value_parser = parse_policy)]
    algorithm: Option<Policy>,

    /// Number of processes to generate
    #[arg(short = 'n', long, default_value_t = DEFAULT_PROCESS_COUNT as i64, allow_negative_numbers = true)]
    count: i64,

    /// Read processes from a file instead of generating them
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Generation mode
    #[arg(long = "gen", value_enum, default_value_t = GenMode::Random)]
    generation: GenMode,

    /// Time quantum for rr and mlq
    #[arg(short, long, allow_negative_numbers = true)]
    quantum: Option<i64>,

    /// Seed for workload generation and I/O decisions (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Exponential arrival rate (larger means denser arrivals)
    #[arg(long, default_value_t = DEFAULT_LAMBDA)]
    lambda: f64,

    /// Burst time distribution
    #[arg(long, value_enum, default_value_t)]
    burst_dist: BurstDist,

    /// Mean burst time (normal and exponential)
    #[arg(long, default_value_t = DEFAULT_BURST_MEAN)]
    mean: f64,

    /// Burst standard deviation (normal)
    #[arg(long, default_value_t = DEFAULT_BURST_STDDEV)]
    stddev: f64,

    /// Smallest burst (uniform)
    #[arg(long, default_value_t = 1)]
    min_burst: Tick,

    /// Largest burst (uniform)
    #[arg(long, default_value_t = 15)]
    max_burst: Tick,

    /// Priority distribution
    #[arg(long, value_enum, default_value_t)]
    prio_dist: PrioDist,

    /// Stop the simulation at this tick (0 or omitted: no limit)
    #[arg(long)]
    time_cap: Option<Tick>,

    /// Probability that a generated process has an I/O phase
    #[arg(long, default_value_t = 0.0)]
    io_chance: f64,

    /// Shortest I/O phase
    #[arg(long, default_value_t = 1)]
    min_io: Tick,

    /// Longest I/O phase
    #[arg(long, default_value_t = 5)]
    max_io: Tick,

    /// Ticks burned by each context switch
    #[arg(long)]
    switch_cost: Option<Tick>,

    /// Disable aging for the priority policies
    #[arg(long)]
    no_aging: bool,

    /// When I/O phases may start
    #[arg(long, value_enum)]
    io_timing: Option<IoTimingArg>,

    /// Chance that a preempted process with pending I/O blocks
    #[arg(long)]
    preempt_io_chance: Option<f64>,

    /// Per-tick chance that a running process starts its I/O mid-burst
    #[arg(long)]
    mid_burst_io_chance: Option<f64>,

    /// Write the Gantt chart as CSV to this path
    #[arg(long)]
    gantt: Option<PathBuf>,

    /// Print the full outcome as JSON instead of the report
    #[arg(long)]
    json: bool,

    /// Load simulation settings from a JSON file; flags override it
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_policy(s: &str) -> std::result::Result<Policy, probsched::SchedulerError> {
    s.parse()
}

impl Cli {
    /// Seed actually used for this run
    fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    fn process_count(&self) -> usize {
        if self.count < 1 {
            warn!(count = self.count, "process count must be positive, using 1");
            1
        } else {
            self.count as usize
        }
    }

    fn simulation_config(&self, seed: u64) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)?,
            None => SimulationConfig {
                context_switch_cost: CONTEXT_SWITCH_COST,
                ..SimulationConfig::default()
            },
        };

        if let Some(policy) = self.algorithm {
            config.policy = policy;
        }
        if let Some(raw) = self.quantum {
            let ticks = if raw < 1 {
                warn!(quantum = raw, "quantum must be positive, using 1");
                1
            } else {
                raw as Tick
            };
            config.scheduler.quantum = probsched::TimeQuantum::new(ticks)?;
        }
        if let Some(cap) = self.time_cap {
            config.time_cap = TimeCap::from_raw(cap);
        }
        if let Some(cost) = self.switch_cost {
            config.context_switch_cost = cost;
        }
        if self.no_aging {
            config.scheduler.aging_enabled = false;
        }
        if let Some(timing) = self.io_timing {
            config.io_timing = timing.into();
        }
        if self.preempt_io_chance.is_some() || self.mid_burst_io_chance.is_some() || self.seed.is_some() {
            config.io = IoModelConfig {
                seed,
                preempt_block_chance: self.preempt_io_chance.unwrap_or(config.io.preempt_block_chance),
                mid_burst_chance: self.mid_burst_io_chance.unwrap_or(config.io.mid_burst_chance),
            };
        }
        Ok(config)
    }

    fn workload(&self, seed: u64) -> Result<Vec<ProcessRecord>> {
        if let Some(path) = &self.file {
            let report = load_workload(path)?;
            if !report.is_clean() {
                warn!(
                    skipped = report.malformed.len(),
                    path = %path.display(),
                    "some workload lines were skipped"
                );
            }
            return Ok(report.records);
        }

        let count = self.process_count();
        match self.generation {
            GenMode::Static => Ok(generate_static(count)),
            GenMode::Random => {
                let burst = match self.burst_dist {
                    BurstDist::Normal => BurstDistribution::Normal {
                        mean: self.mean,
                        stddev: self.stddev,
                    },
                    BurstDist::Uniform => BurstDistribution::Uniform {
                        min: self.min_burst,
                        max: self.max_burst,
                    },
                    BurstDist::Exponential => BurstDistribution::Exponential { mean: self.mean },
                };
                let priority = match self.prio_dist {
                    PrioDist::Uniform => PriorityDistribution::Uniform,
                    PrioDist::Biased => PriorityDistribution::Biased,
                };
                let params = RandomWorkload {
                    count,
                    seed,
                    lambda: self.lambda,
                    burst,
                    priority,
                    io: IoProfile {
                        chance: self.io_chance,
                        min_duration: self.min_io,
                        max_duration: self.max_io,
                    },
                };
                Ok(params.generate()?)
            }
        }
    }
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let seed = cli.resolve_seed();
    let config = cli.simulation_config(seed)?;
    let records = cli.workload(seed)?;

    let quantum = config
        .policy
        .uses_quantum()
        .then(|| config.scheduler.quantum.ticks());
    info!(
        policy = %config.policy,
        preemptive = config.policy.is_preemptive(),
        ?quantum,
        processes = records.len(),
        seed,
        time_cap = config.time_cap.as_raw(),
        switch_cost = config.context_switch_cost,
        "starting simulation"
    );

    if config.policy == Policy::RateMonotonic {
        let total = utilization(&records);
        let bound = utilization_bound(records.iter().filter(|r| r.period > 0).count());
        info!(utilization = total, bound, schedulable = total <= bound, "rate monotonic bound check");
    }

    let outcome = Simulation::new(config).run(records)?;

    if let Some(path) = &cli.gantt {
        outcome
            .gantt
            .save_csv(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to write Gantt CSV to {}", path.display()))?;
        info!(path = %path.display(), segments = outcome.gantt.len(), "Gantt chart written");
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&outcome).into_diagnostic()?;
        println!("{}", json);
    } else {
        println!("{}", outcome.metrics);
    }

    Ok(())
}
