/*!
 * Rate-Monotonic (preemptive)
 *
 * Uses the static `priority` field as the rate surrogate: a smaller value
 * stands for a shorter period and therefore higher urgency. Only the
 * ordering is enforced; schedulability is reported, never checked.
 */

use super::select_min_by;
use crate::core::types::{Slot, Tick};
use crate::process::{ProcessRecord, ProcessTable};
use crate::scheduler::traits::SelectionStrategy;
use crate::scheduler::types::Policy;

#[derive(Debug, Default, Clone)]
pub struct RateMonotonic;

impl SelectionStrategy for RateMonotonic {
    fn policy(&self) -> Policy {
        Policy::RateMonotonic
    }

    fn select_next(&self, table: &ProcessTable, _now: Tick) -> Option<Slot> {
        select_min_by(table, |r| r.priority)
    }

    fn preempts(&self, table: &ProcessTable, running: Slot, candidate: Slot) -> bool {
        table.get(candidate).priority < table.get(running).priority
    }
}

/// Liu-Layland utilization bound `n(2^(1/n) - 1)` for `n` periodic tasks
#[must_use]
pub fn utilization_bound(n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    n * (2f64.powf(1.0 / n) - 1.0)
}

/// Total utilization `sum(burst / period)` over records with a period
#[must_use]
pub fn utilization(records: &[ProcessRecord]) -> f64 {
    records
        .iter()
        .filter(|r| r.period > 0)
        .map(|r| r.burst_time as f64 / r.period as f64)
        .sum()
}
