/*!
 * Process Table
 * Arena of process records addressed by stable slot index
 */

use super::types::{ProcessRecord, ProcessState};
use crate::core::errors::ProcessError;
use crate::core::types::{Pid, SimulationResult, Slot};
use ahash::AHashSet;

/// Owns the records of one simulation run
///
/// Records are ordered by `(arrival_time, pid)` at construction, so a lower
/// slot always means an earlier (or equal, lower-pid) arrival. Strategies
/// rely on that order for tie-breaking and circular scans.
#[derive(Debug, Clone, Default)]
pub struct ProcessTable {
    records: Vec<ProcessRecord>,
}

impl ProcessTable {
    /// Validate, reset and order a workload
    pub fn new(mut records: Vec<ProcessRecord>) -> SimulationResult<Self> {
        let mut seen: AHashSet<Pid> = AHashSet::new();
        seen.try_reserve(records.len())?;

        for record in &mut records {
            if record.burst_time == 0 {
                return Err(ProcessError::InvalidRecord {
                    pid: record.pid,
                    reason: "burst time must be at least 1 tick".to_string(),
                }
                .into());
            }
            if !seen.insert(record.pid) {
                return Err(ProcessError::DuplicatePid(record.pid).into());
            }
            record.reset();
        }

        records.sort_by_key(|r| (r.arrival_time, r.pid));
        Ok(Self { records })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline(always)]
    #[must_use]
    pub fn get(&self, slot: Slot) -> &ProcessRecord {
        &self.records[slot]
    }

    #[inline(always)]
    pub(crate) fn get_mut(&mut self, slot: Slot) -> &mut ProcessRecord {
        &mut self.records[slot]
    }

    #[inline]
    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    #[inline]
    pub(crate) fn records_mut(&mut self) -> &mut [ProcessRecord] {
        &mut self.records
    }

    /// Iterate `(slot, record)` pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &ProcessRecord)> {
        self.records.iter().enumerate()
    }

    /// Iterate the READY records in table order
    pub fn ready(&self) -> impl Iterator<Item = (Slot, &ProcessRecord)> {
        self.iter().filter(|(_, r)| r.is_ready())
    }

    #[must_use]
    pub fn count_in(&self, state: ProcessState) -> usize {
        self.records.iter().filter(|r| r.state == state).count()
    }

    #[inline]
    #[must_use]
    pub fn all_terminated(&self) -> bool {
        self.records.iter().all(ProcessRecord::is_terminated)
    }

    /// Hand the records back to the caller
    #[must_use]
    pub fn into_records(self) -> Vec<ProcessRecord> {
        self.records
    }
}
