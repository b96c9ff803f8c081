/*!
 * Scheduling Policies
 * One selection strategy per policy, plus the selection helpers they share
 */

mod edf;
mod fcfs;
mod multilevel;
mod priority;
mod rate_monotonic;
mod round_robin;
mod sjf;

pub use edf::EarliestDeadlineFirst;
pub use fcfs::FirstComeFirstServed;
pub use multilevel::{band_of, MultilevelQueue};
pub use priority::PriorityScheduling;
pub use rate_monotonic::{utilization, utilization_bound, RateMonotonic};
pub use round_robin::RoundRobin;
pub use sjf::ShortestJobFirst;

use crate::core::types::Slot;
use crate::process::{ProcessRecord, ProcessTable};

/// READY record minimizing `key`, ties broken by earliest arrival then slot
///
/// # Performance
/// O(n) scan; workloads are small and the scan stays cache-friendly
pub(crate) fn select_min_by<K, F>(table: &ProcessTable, key: F) -> Option<Slot>
where
    K: Ord,
    F: Fn(&ProcessRecord) -> K,
{
    table
        .ready()
        .min_by_key(|(slot, r)| (key(r), r.arrival_time, *slot))
        .map(|(slot, _)| slot)
}

/// First READY record satisfying `accept`, scanning circularly from just
/// after `cursor` (or from slot 0 when nothing was dispatched yet)
pub(crate) fn circular_scan<F>(table: &ProcessTable, cursor: Option<Slot>, accept: F) -> Option<Slot>
where
    F: Fn(&ProcessRecord) -> bool,
{
    let len = table.len();
    if len == 0 {
        return None;
    }
    let start = cursor.map_or(0, |slot| (slot + 1) % len);
    (0..len)
        .map(|offset| (start + offset) % len)
        .find(|&slot| {
            let record = table.get(slot);
            record.is_ready() && accept(record)
        })
}


#[cfg(test)]
mod tests {
    use super::test_support::ready_table;
    use super::*;

    #[test]
    fn test_select_min_by_breaks_ties_by_arrival() {
        let table = ready_table(vec![
            ProcessRecord::new(1, 4, 3),
            ProcessRecord::new(2, 1, 3),
            ProcessRecord::new(3, 0, 9),
        ]);
        // Slots follow arrival: pid 3, pid 2, pid 1
        let slot = select_min_by(&table, |r| r.burst_time).unwrap();
        assert_eq!(table.get(slot).pid, 2);
    }

    #[test]
    fn test_circular_scan_wraps_after_cursor() {
        let table = ready_table(vec![
            ProcessRecord::new(1, 0, 1),
            ProcessRecord::new(2, 1, 1),
            ProcessRecord::new(3, 2, 1),
        ]);
        assert_eq!(circular_scan(&table, None, |_| true), Some(0));
        assert_eq!(circular_scan(&table, Some(0), |_| true), Some(1));
        assert_eq!(circular_scan(&table, Some(2), |_| true), Some(0));
        assert_eq!(circular_scan(&table, Some(0), |r| r.pid == 1), Some(0));
        assert_eq!(circular_scan(&table, None, |r| r.pid == 9), None);
    }
}
