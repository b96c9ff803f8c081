/*!
 * Monitoring Module
 * Occupancy trace, post-run metrics and structured tracing
 */

pub mod gantt;
pub mod metrics;
pub mod tracer;

pub use gantt::{GanttLog, GanttSegment, Occupant};
pub use metrics::{ProcessMetrics, RunCounters, SimulationMetrics};
pub use tracer::{generate_run_id, init_tracing, simulation_span};
