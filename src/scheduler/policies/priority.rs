/*!
 * Priority Scheduling
 * Smallest current priority wins, optionally preemptive, optionally aging
 */

use super::select_min_by;
use crate::core::types::{Slot, Tick};
use crate::process::ProcessTable;
use crate::scheduler::traits::SelectionStrategy;
use crate::scheduler::types::{AgingConfig, Policy};

/// Priority strategy
///
/// Selection and preemption read `current_priority`, which aging lowers
/// over time for records starving in READY.
#[derive(Debug, Clone)]
pub struct PriorityScheduling {
    preemptive: bool,
    aging: Option<AgingConfig>,
}

impl PriorityScheduling {
    pub fn new(preemptive: bool, aging: Option<AgingConfig>) -> Self {
        Self { preemptive, aging }
    }
}

impl SelectionStrategy for PriorityScheduling {
    fn policy(&self) -> Policy {
        if self.preemptive {
            Policy::PriorityPreemptive
        } else {
            Policy::PriorityNonPreemptive
        }
    }

    fn select_next(&self, table: &ProcessTable, _now: Tick) -> Option<Slot> {
        select_min_by(table, |r| r.current_priority)
    }

    fn preempts(&self, table: &ProcessTable, running: Slot, candidate: Slot) -> bool {
        self.preemptive
            && table.get(candidate).current_priority < table.get(running).current_priority
    }

    fn aging(&self) -> Option<AgingConfig> {
        self.aging
    }
}
