/*!
 * First-Come First-Served
 */

use super::select_min_by;
use crate::core::types::{Slot, Tick};
use crate::process::ProcessTable;
use crate::scheduler::traits::SelectionStrategy;
use crate::scheduler::types::Policy;

/// Earliest arrival wins; a dispatched record keeps the CPU until it
/// completes, blocks, or the time cap hits
#[derive(Debug, Default, Clone)]
pub struct FirstComeFirstServed;

impl SelectionStrategy for FirstComeFirstServed {
    fn policy(&self) -> Policy {
        Policy::Fcfs
    }

    fn select_next(&self, table: &ProcessTable, _now: Tick) -> Option<Slot> {
        select_min_by(table, |r| r.arrival_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessRecord;
    use crate::scheduler::policies::test_support::{ready_table, run};

    #[test]
    fn test_fcfs_picks_earliest_arrival() {
        let table = ready_table(vec![
            ProcessRecord::new(1, 3, 1),
            ProcessRecord::new(2, 1, 8),
            ProcessRecord::new(3, 2, 2),
        ]);
        let slot = FirstComeFirstServed.select_next(&table, 3).unwrap();
        assert_eq!(table.get(slot).pid, 2);
    }

    #[test]
    fn test_fcfs_never_preempts() {
        let mut table = ready_table(vec![ProcessRecord::new(1, 0, 9), ProcessRecord::new(2, 0, 1)]);
        run(&mut table, 0);
        assert!(!FirstComeFirstServed.preempts(&table, 0, 1));
        assert_eq!(FirstComeFirstServed.select_next(&table, 0), Some(1));
    }
}
