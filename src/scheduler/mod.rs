/*!
 * Scheduler Module
 * Policy selection, policy parameters and selection strategies
 */

pub mod policies;
pub mod traits;
pub mod types;

// Re-export public API
pub use policies::{
    band_of, utilization, utilization_bound, EarliestDeadlineFirst, FirstComeFirstServed,
    MultilevelQueue, PriorityScheduling, RateMonotonic, RoundRobin, ShortestJobFirst,
};
pub use traits::SelectionStrategy;
pub use types::{AgingConfig, Policy, SchedulerConfig, TimeQuantum};

/// Build the strategy for `policy` from its numeric parameters
pub fn build_strategy(policy: Policy, config: &SchedulerConfig) -> Box<dyn SelectionStrategy> {
    let aging = config.aging_enabled.then_some(config.aging);
    match policy {
        Policy::Fcfs => Box::new(FirstComeFirstServed),
        Policy::Sjf => Box::new(ShortestJobFirst),
        Policy::RoundRobin => Box::new(RoundRobin::new(config.quantum)),
        Policy::PriorityNonPreemptive => Box::new(PriorityScheduling::new(false, aging)),
        Policy::PriorityPreemptive => Box::new(PriorityScheduling::new(true, aging)),
        Policy::Edf => Box::new(EarliestDeadlineFirst),
        Policy::RateMonotonic => Box::new(RateMonotonic),
        Policy::MultilevelQueue => Box::new(MultilevelQueue::new(config.quantum)),
    }
}
