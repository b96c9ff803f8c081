/*!
 * Clock Events
 * Arrivals, I/O completions and aging applied at one instant
 */

use crate::core::types::Tick;
use crate::process::{ProcessResult, ProcessState, ProcessTable};
use crate::scheduler::AgingConfig;
use tracing::{debug, trace};

/// Admit every NEW record whose arrival time has come; returns how many
pub fn apply_arrivals(table: &mut ProcessTable, now: Tick) -> ProcessResult<usize> {
    let mut admitted = 0;
    for record in table.records_mut() {
        if record.state() == ProcessState::New && record.arrival_time <= now {
            record.admit()?;
            admitted += 1;
            debug!(pid = record.pid, now, "arrived");
        }
    }
    Ok(admitted)
}

/// Finish the I/O of every BLOCKED record whose completion time has come
///
/// Records whose CPU demand was already exhausted terminate at their I/O
/// completion time; the rest return to READY. Returns how many completed.
pub fn apply_io_completions(table: &mut ProcessTable, now: Tick) -> ProcessResult<usize> {
    let mut completed = 0;
    for record in table.records_mut() {
        let due = record.state() == ProcessState::Blocked
            && record.io_completion_time().is_some_and(|t| t <= now);
        if due {
            let state = record.complete_io()?;
            completed += 1;
            debug!(pid = record.pid, now, state = state.as_str(), "io completed");
        }
    }
    Ok(completed)
}

/// Earliest future instant at which a NEW record arrives or a BLOCKED
/// record finishes its I/O
pub fn next_event_time(table: &ProcessTable, now: Tick) -> Option<Tick> {
    table
        .records()
        .iter()
        .filter_map(|record| match record.state() {
            ProcessState::New => Some(record.arrival_time),
            ProcessState::Blocked => record.io_completion_time(),
            _ => None,
        })
        .filter(|&t| t > now)
        .min()
}

/// Credit `ticks` of waiting to every READY record
#[inline]
pub fn accumulate_wait(table: &mut ProcessTable, ticks: Tick) {
    for record in table.records_mut() {
        if record.is_ready() {
            record.time_in_ready_queue += ticks;
        }
    }
}

/// Promote every READY record that has waited past the aging threshold;
/// returns how many moved up
pub fn apply_aging(table: &mut ProcessTable, aging: &AgingConfig) -> usize {
    let mut promoted = 0;
    for record in table.records_mut() {
        if record.is_ready() && record.time_in_ready_queue() >= aging.threshold && record.promote() {
            promoted += 1;
            trace!(pid = record.pid, priority = record.current_priority(), "aged");
        }
    }
    promoted
}
