/*!
 * Shortest Job First (non-preemptive)
 */

use super::select_min_by;
use crate::core::types::{Slot, Tick};
use crate::process::ProcessTable;
use crate::scheduler::traits::SelectionStrategy;
use crate::scheduler::types::Policy;

/// Smallest original burst wins. The criterion is the fixed `burst_time`,
/// not `remaining_time`.
#[derive(Debug, Default, Clone)]
pub struct ShortestJobFirst;

impl SelectionStrategy for ShortestJobFirst {
    fn policy(&self) -> Policy {
        Policy::Sjf
    }

    fn select_next(&self, table: &ProcessTable, _now: Tick) -> Option<Slot> {
        select_min_by(table, |r| r.burst_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessRecord;
    use crate::scheduler::policies::test_support::ready_table;

    #[test]
    fn test_sjf_uses_original_burst() {
        let mut table = ready_table(vec![ProcessRecord::new(1, 0, 6), ProcessRecord::new(2, 0, 4)]);
        // Pid 1 has run most of its burst; SJF still prefers the shorter original job
        table.get_mut(0).remaining_time = 1;

        let slot = ShortestJobFirst.select_next(&table, 0).unwrap();
        assert_eq!(table.get(slot).pid, 2);
    }

    #[test]
    fn test_sjf_tie_goes_to_earlier_arrival() {
        let table = ready_table(vec![ProcessRecord::new(7, 2, 3), ProcessRecord::new(8, 1, 3)]);
        let slot = ShortestJobFirst.select_next(&table, 2).unwrap();
        assert_eq!(table.get(slot).pid, 8);
    }
}
