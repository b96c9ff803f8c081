/*!
 * Earliest Deadline First (preemptive)
 */

use super::select_min_by;
use crate::core::types::{Slot, Tick};
use crate::process::{ProcessRecord, ProcessTable};
use crate::scheduler::traits::SelectionStrategy;
use crate::scheduler::types::Policy;

/// Absolute deadline used for ordering; a zero deadline means "none" and
/// sorts after every real deadline
#[inline]
fn effective_deadline(record: &ProcessRecord) -> Tick {
    if record.deadline == 0 {
        Tick::MAX
    } else {
        record.deadline
    }
}

#[derive(Debug, Default, Clone)]
pub struct EarliestDeadlineFirst;

impl SelectionStrategy for EarliestDeadlineFirst {
    fn policy(&self) -> Policy {
        Policy::Edf
    }

    fn select_next(&self, table: &ProcessTable, _now: Tick) -> Option<Slot> {
        select_min_by(table, effective_deadline)
    }

    fn preempts(&self, table: &ProcessTable, running: Slot, candidate: Slot) -> bool {
        effective_deadline(table.get(candidate)) < effective_deadline(table.get(running))
    }
}
