/*!
 * Round Robin
 * Circular scan over the READY set with a fixed quantum
 */

use super::circular_scan;
use crate::core::types::{Slot, Tick};
use crate::process::{ProcessRecord, ProcessTable};
use crate::scheduler::traits::SelectionStrategy;
use crate::scheduler::types::{Policy, TimeQuantum};

/// Round Robin strategy
///
/// The scan starts just after the last dispatched slot, so a record whose
/// quantum expired is reconsidered only after every other READY record.
#[derive(Debug, Clone)]
pub struct RoundRobin {
    quantum: TimeQuantum,
    cursor: Option<Slot>,
}

impl RoundRobin {
    pub fn new(quantum: TimeQuantum) -> Self {
        Self {
            quantum,
            cursor: None,
        }
    }
}

impl SelectionStrategy for RoundRobin {
    fn policy(&self) -> Policy {
        Policy::RoundRobin
    }

    fn select_next(&self, table: &ProcessTable, _now: Tick) -> Option<Slot> {
        circular_scan(table, self.cursor, |_| true)
    }

    fn quantum_for(&self, _record: &ProcessRecord) -> Option<Tick> {
        Some(self.quantum.ticks())
    }

    fn on_dispatch(&mut self, slot: Slot, _record: &ProcessRecord) {
        self.cursor = Some(slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::policies::test_support::ready_table;

    #[test]
    fn test_round_robin_rotates() {
        let table = ready_table(vec![
            ProcessRecord::new(1, 0, 5),
            ProcessRecord::new(2, 0, 5),
            ProcessRecord::new(3, 0, 5),
        ]);
        let mut rr = RoundRobin::new(TimeQuantum::new(2).unwrap());

        let mut order = Vec::new();
        for _ in 0..4 {
            let slot = rr.select_next(&table, 0).unwrap();
            order.push(table.get(slot).pid);
            rr.on_dispatch(slot, table.get(slot));
        }
        assert_eq!(order, vec![1, 2, 3, 1]);
    }

    #[test]
    fn test_round_robin_loads_quantum() {
        let rr = RoundRobin::new(TimeQuantum::new(3).unwrap());
        assert_eq!(rr.quantum_for(&ProcessRecord::new(1, 0, 9)), Some(3));
        assert!(rr.aging().is_none());
    }
}
