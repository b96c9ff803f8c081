/*!
 * Simulation Limits and Constants
 *
 * Centralized location for the tunable constants of the simulator.
 * Organized by domain for maintainability and discoverability.
 */

use crate::core::types::{Priority, Tick};

// =============================================================================
// CONTEXT SWITCHING
// =============================================================================

/// Context switch cost used by the command line front end
/// Each switch between two different processes burns this many ticks
pub const CONTEXT_SWITCH_COST: Tick = 1;

/// Context switch cost of a default-configured run
/// Zero models an ideal dispatcher; traces then contain no switch spans
pub const DEFAULT_CONTEXT_SWITCH_COST: Tick = 0;

// =============================================================================
// AGING
// =============================================================================

/// Minimum ticks a READY record must wait before aging promotes it
pub const AGING_THRESHOLD: Tick = 20;

/// Aging pass period in ticks
pub const AGING_INTERVAL: Tick = 10;

/// Numerically smallest priority aging will promote to
/// Records already at or below this value never age
pub const HIGHEST_PRIORITY: Priority = 1;

/// Lowest urgency produced by the workload generator
pub const LOWEST_PRIORITY: Priority = 5;

// =============================================================================
// QUANTUM
// =============================================================================

/// Default Round Robin / Multilevel Queue base quantum
pub const DEFAULT_QUANTUM: Tick = 4;

// =============================================================================
// MULTILEVEL QUEUE BANDS
// =============================================================================

/// Largest priority value mapped into band 0 (RR, base quantum)
pub const MLQ_BAND0_MAX_PRIORITY: Priority = 2;

/// Largest priority value mapped into band 1 (RR, doubled quantum)
pub const MLQ_BAND1_MAX_PRIORITY: Priority = 4;

/// Number of bands; the last one is FCFS
pub const MLQ_BANDS: usize = 3;

// =============================================================================
// GANTT SENTINELS
// =============================================================================

/// Serialized occupant id of an idle CPU span
pub const GANTT_IDLE_PID: i64 = -1;

/// Serialized occupant id of a context switch span
pub const GANTT_SWITCH_PID: i64 = -2;

// =============================================================================
// WORKLOAD DEFAULTS
// =============================================================================

/// Default process count when none is given
pub const DEFAULT_PROCESS_COUNT: usize = 5;

/// Default exponential arrival rate
pub const DEFAULT_LAMBDA: f64 = 0.5;

/// Default normal burst mean
pub const DEFAULT_BURST_MEAN: f64 = 8.0;

/// Default normal burst standard deviation
pub const DEFAULT_BURST_STDDEV: f64 = 3.0;

/// Base relative deadline added to every generated arrival
pub const BASE_RELATIVE_DEADLINE: Tick = 10;

/// Random slack added on top of the base relative deadline (exclusive bound)
pub const DEADLINE_SLACK: Tick = 10;
