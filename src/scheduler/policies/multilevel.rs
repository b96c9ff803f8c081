/*!
 * Multilevel Queue
 *
 * Three fixed bands chosen once from the original priority:
 * - band 0: Round Robin, base quantum
 * - band 1: Round Robin, doubled quantum
 * - band 2: FCFS
 *
 * A lower band always beats a higher one, including by preemption.
 */

use super::circular_scan;
use crate::core::limits::{MLQ_BAND0_MAX_PRIORITY, MLQ_BAND1_MAX_PRIORITY, MLQ_BANDS};
use crate::core::types::{Priority, Slot, Tick};
use crate::process::{ProcessRecord, ProcessTable};
use crate::scheduler::traits::SelectionStrategy;
use crate::scheduler::types::{Policy, TimeQuantum};

/// Band a static priority maps to
#[inline]
#[must_use]
pub const fn band_of(priority: Priority) -> usize {
    if priority <= MLQ_BAND0_MAX_PRIORITY {
        0
    } else if priority <= MLQ_BAND1_MAX_PRIORITY {
        1
    } else {
        2
    }
}

#[inline]
fn band(record: &ProcessRecord) -> usize {
    record
        .current_queue
        .unwrap_or_else(|| band_of(record.priority))
}

#[derive(Debug, Clone)]
pub struct MultilevelQueue {
    base_quantum: TimeQuantum,
    /// Last dispatched slot per Round Robin band
    cursors: [Option<Slot>; MLQ_BANDS],
}

impl MultilevelQueue {
    pub fn new(base_quantum: TimeQuantum) -> Self {
        Self {
            base_quantum,
            cursors: [None; MLQ_BANDS],
        }
    }

    fn select_in_band(&self, table: &ProcessTable, level: usize) -> Option<Slot> {
        if level == MLQ_BANDS - 1 {
            return table
                .ready()
                .filter(|(_, r)| band(r) == level)
                .min_by_key(|(slot, r)| (r.arrival_time, *slot))
                .map(|(slot, _)| slot);
        }
        circular_scan(table, self.cursors[level], |r| band(r) == level)
    }
}

impl SelectionStrategy for MultilevelQueue {
    fn policy(&self) -> Policy {
        Policy::MultilevelQueue
    }

    fn prepare(&mut self, table: &mut ProcessTable) {
        for record in table.records_mut() {
            record.current_queue = Some(band_of(record.priority));
        }
    }

    fn select_next(&self, table: &ProcessTable, _now: Tick) -> Option<Slot> {
        (0..MLQ_BANDS).find_map(|level| self.select_in_band(table, level))
    }

    fn preempts(&self, table: &ProcessTable, running: Slot, candidate: Slot) -> bool {
        band(table.get(candidate)) < band(table.get(running))
    }

    fn quantum_for(&self, record: &ProcessRecord) -> Option<Tick> {
        match band(record) {
            0 => Some(self.base_quantum.ticks()),
            1 => Some(self.base_quantum.ticks().saturating_mul(2)),
            _ => None,
        }
    }

    fn on_dispatch(&mut self, slot: Slot, record: &ProcessRecord) {
        let level = band(record);
        if level < MLQ_BANDS - 1 {
            self.cursors[level] = Some(slot);
        }
    }
}
