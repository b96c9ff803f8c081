/*!
 * Simulation Module
 * Run configuration, the event loop and its public entry points
 */

pub mod api;
pub mod config;
mod engine;
pub mod events;
pub mod io;

pub use api::{
    schedule_edf, schedule_fcfs, schedule_mlq, schedule_priority, schedule_rm, schedule_rr,
    schedule_sjf,
};
pub use config::{IoModelConfig, IoTiming, SimulationConfig};
pub use io::{DeterministicIo, IoModel, MidpointIo, SeededIo};

use crate::core::errors::SchedulerError;
use crate::core::types::{SimulationResult, Tick, TimeCap};
use crate::monitoring::{simulation_span, GanttLog, SimulationMetrics};
use crate::process::{ProcessRecord, ProcessTable};
use crate::scheduler::{build_strategy, AgingConfig, Policy, TimeQuantum};
use engine::{Engine, EngineSettings};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Everything a finished run produces
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationOutcome {
    /// Records in table order (arrival time, then pid)
    pub records: Vec<ProcessRecord>,
    pub gantt: GanttLog,
    pub metrics: SimulationMetrics,
}

/// A configured simulator; each `run` starts from a clean slate
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::default()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run `records` with the I/O model described by the configuration
    pub fn run(&self, records: Vec<ProcessRecord>) -> SimulationResult<SimulationOutcome> {
        let mut io = self.config.io.build();
        self.run_with_io(records, io.as_mut())
    }

    /// Run `records` with a caller-supplied I/O model
    pub fn run_with_io(
        &self,
        records: Vec<ProcessRecord>,
        io: &mut dyn IoModel,
    ) -> SimulationResult<SimulationOutcome> {
        let policy = self.config.policy;
        let span = simulation_span(policy, records.len());
        let _guard = span.enter();

        let settings = EngineSettings {
            time_cap: self.config.time_cap,
            switch_cost: self.config.context_switch_cost,
            io_timing: self.config.io_timing,
        };
        let (table, gantt, counters) = ProcessTable::new(records)
            .and_then(|table| {
                let strategy = build_strategy(policy, &self.config.scheduler);
                Engine::new(table, strategy, io, settings)?.run()
            })
            .map_err(|err| {
                error!(error = %err, "simulation aborted");
                err
            })?;
        let metrics = SimulationMetrics::aggregate(policy, table.records(), &counters);

        info!(
            final_time = metrics.final_time,
            completed = metrics.completed,
            unfinished = metrics.unfinished,
            context_switches = metrics.context_switches,
            "simulation finished"
        );

        Ok(SimulationOutcome {
            records: table.into_records(),
            gantt,
            metrics,
        })
    }
}

/// Fluent construction of a [`Simulation`]
///
/// The quantum is validated in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    config: SimulationConfig,
    quantum: Option<Tick>,
}

impl SimulationBuilder {
    /// Start from an existing configuration
    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.config.policy = policy;
        self
    }

    pub fn with_quantum(mut self, quantum: Tick) -> Self {
        self.quantum = Some(quantum);
        self
    }

    pub fn with_time_cap(mut self, time_cap: TimeCap) -> Self {
        self.config.time_cap = time_cap;
        self
    }

    pub fn with_context_switch_cost(mut self, cost: Tick) -> Self {
        self.config.context_switch_cost = cost;
        self
    }

    /// Enable or disable aging for the priority policies
    pub fn with_aging(mut self, enabled: bool) -> Self {
        self.config.scheduler.aging_enabled = enabled;
        self
    }

    pub fn with_aging_config(mut self, aging: AgingConfig) -> Self {
        self.config.scheduler.aging = aging;
        self
    }

    pub fn with_io_timing(mut self, timing: IoTiming) -> Self {
        self.config.io_timing = timing;
        self
    }

    /// Seeded I/O decisions with the given chances
    pub fn with_seeded_io(mut self, seed: u64, preempt_block_chance: f64, mid_burst_chance: f64) -> Self {
        self.config.io = IoModelConfig {
            seed,
            preempt_block_chance,
            mid_burst_chance,
        };
        self
    }

    pub fn build(self) -> Result<Simulation, SchedulerError> {
        let mut config = self.config;
        if let Some(quantum) = self.quantum {
            config.scheduler.quantum = TimeQuantum::new(quantum)?;
        }
        Ok(Simulation::new(config))
    }
}
