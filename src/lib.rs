/*!
 * probsched Library
 * Discrete-event simulation of CPU scheduling policies on a single CPU
 */

pub mod core;
pub mod monitoring;
pub mod process;
pub mod scheduler;
pub mod simulation;
pub mod workload;

// Re-exports
pub use crate::core::errors::*;
pub use crate::core::types::{Pid, Priority, SimulationResult, Slot, Tick, TimeCap};
pub use monitoring::{init_tracing, GanttLog, GanttSegment, Occupant, ProcessMetrics, SimulationMetrics};
pub use process::{ProcessRecord, ProcessState, ProcessTable};
pub use scheduler::{AgingConfig, Policy, SchedulerConfig, SelectionStrategy, TimeQuantum};
pub use simulation::{
    schedule_edf, schedule_fcfs, schedule_mlq, schedule_priority, schedule_rm, schedule_rr,
    schedule_sjf, IoModel, IoTiming, Simulation, SimulationBuilder, SimulationConfig,
    SimulationOutcome,
};
pub use workload::{generate_static, load_workload, parse_workload, ParseReport, RandomWorkload};
