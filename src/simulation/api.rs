/*!
 * Per-Policy Entry Points
 * One-call wrappers binding a policy to the shared loop
 *
 * Each wrapper uses the default configuration (no context-switch cost,
 * aging on, deterministic I/O) apart from the arguments it takes.
 */

use super::{Simulation, SimulationOutcome};
use crate::core::types::{SimulationResult, Tick, TimeCap};
use crate::process::ProcessRecord;
use crate::scheduler::Policy;

fn schedule(
    policy: Policy,
    records: Vec<ProcessRecord>,
    quantum: Option<Tick>,
    aging: bool,
    time_cap: TimeCap,
) -> SimulationResult<SimulationOutcome> {
    let mut builder = Simulation::builder()
        .with_policy(policy)
        .with_aging(aging)
        .with_time_cap(time_cap);
    if let Some(quantum) = quantum {
        builder = builder.with_quantum(quantum);
    }
    builder.build()?.run(records)
}

/// First-Come First-Served
pub fn schedule_fcfs(records: Vec<ProcessRecord>, time_cap: TimeCap) -> SimulationResult<SimulationOutcome> {
    schedule(Policy::Fcfs, records, None, false, time_cap)
}

/// Non-preemptive Shortest Job First
pub fn schedule_sjf(records: Vec<ProcessRecord>, time_cap: TimeCap) -> SimulationResult<SimulationOutcome> {
    schedule(Policy::Sjf, records, None, false, time_cap)
}

/// Round Robin with a fixed quantum
pub fn schedule_rr(
    records: Vec<ProcessRecord>,
    quantum: Tick,
    time_cap: TimeCap,
) -> SimulationResult<SimulationOutcome> {
    schedule(Policy::RoundRobin, records, Some(quantum), false, time_cap)
}

/// Priority scheduling, optionally preemptive, optionally with aging
pub fn schedule_priority(
    records: Vec<ProcessRecord>,
    preemptive: bool,
    aging: bool,
    time_cap: TimeCap,
) -> SimulationResult<SimulationOutcome> {
    let policy = if preemptive {
        Policy::PriorityPreemptive
    } else {
        Policy::PriorityNonPreemptive
    };
    schedule(policy, records, None, aging, time_cap)
}

/// Preemptive Earliest Deadline First
pub fn schedule_edf(records: Vec<ProcessRecord>, time_cap: TimeCap) -> SimulationResult<SimulationOutcome> {
    schedule(Policy::Edf, records, None, false, time_cap)
}

/// Preemptive Rate Monotonic
pub fn schedule_rm(records: Vec<ProcessRecord>, time_cap: TimeCap) -> SimulationResult<SimulationOutcome> {
    schedule(Policy::RateMonotonic, records, None, false, time_cap)
}

/// Three-band Multilevel Queue with base quantum `quantum`
pub fn schedule_mlq(
    records: Vec<ProcessRecord>,
    quantum: Tick,
    time_cap: TimeCap,
) -> SimulationResult<SimulationOutcome> {
    schedule(Policy::MultilevelQueue, records, Some(quantum), false, time_cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::{SchedulerError, SimulationError};

    #[test]
    fn test_rr_rejects_zero_quantum() {
        let err = schedule_rr(vec![ProcessRecord::new(1, 0, 1)], 0, TimeCap::Unbounded).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Scheduler(SchedulerError::InvalidQuantum(0))
        ));
    }

    #[test]
    fn test_every_wrapper_completes_a_simple_workload() {
        let records = || vec![ProcessRecord::new(1, 0, 2), ProcessRecord::new(2, 1, 1)];
        let outcomes = [
            schedule_fcfs(records(), TimeCap::Unbounded),
            schedule_sjf(records(), TimeCap::Unbounded),
            schedule_rr(records(), 1, TimeCap::Unbounded),
            schedule_priority(records(), false, true, TimeCap::Unbounded),
            schedule_priority(records(), true, true, TimeCap::Unbounded),
            schedule_edf(records(), TimeCap::Unbounded),
            schedule_rm(records(), TimeCap::Unbounded),
            schedule_mlq(records(), 2, TimeCap::Unbounded),
        ];
        for outcome in outcomes {
            let outcome = outcome.unwrap();
            assert_eq!(outcome.metrics.completed, 2);
            assert_eq!(outcome.metrics.final_time, 3);
        }
    }
}
