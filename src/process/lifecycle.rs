/*!
 * Process Lifecycle
 * Legal state transitions and the bookkeeping each one carries
 */

use super::types::{ProcessRecord, ProcessResult, ProcessState};
use crate::core::errors::ProcessError;
use crate::core::limits::HIGHEST_PRIORITY;
use crate::core::types::Tick;

impl ProcessRecord {
    /// Move to `to`, rejecting anything the state machine forbids
    fn transition(&mut self, to: ProcessState) -> ProcessResult<()> {
        if !self.state.can_transition_to(to) {
            return Err(ProcessError::InvalidStateTransition {
                pid: self.pid,
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }

    /// NEW -> READY on arrival
    pub(crate) fn admit(&mut self) -> ProcessResult<()> {
        self.transition(ProcessState::Ready)?;
        self.time_in_ready_queue = 0;
        Ok(())
    }

    /// READY -> RUNNING, loading a fresh quantum when the policy uses one
    pub(crate) fn dispatch(&mut self, now: Tick, quantum: Option<Tick>) -> ProcessResult<()> {
        self.transition(ProcessState::Running)?;
        self.start_time.get_or_insert(now);
        self.time_in_ready_queue = 0;
        self.time_slice_remaining = quantum;
        Ok(())
    }

    /// Consume one tick of CPU
    ///
    /// # Performance
    /// Hot path - called once per simulated busy tick
    #[inline]
    pub(crate) fn run_tick(&mut self) {
        debug_assert!(self.is_running(), "only the running record consumes CPU");
        self.remaining_time = self.remaining_time.saturating_sub(1);
        if let Some(slice) = self.time_slice_remaining.as_mut() {
            *slice = slice.saturating_sub(1);
        }
    }

    /// Whether the loaded quantum is used up
    #[inline]
    pub(crate) fn quantum_expired(&self) -> bool {
        self.time_slice_remaining == Some(0)
    }

    /// RUNNING -> READY (preemption, quantum expiry, time cap)
    pub(crate) fn requeue(&mut self) -> ProcessResult<()> {
        self.transition(ProcessState::Ready)?;
        self.time_in_ready_queue = 0;
        self.time_slice_remaining = None;
        Ok(())
    }

    /// RUNNING -> BLOCKED for the record's single I/O phase
    pub(crate) fn block_for_io(&mut self, now: Tick) -> ProcessResult<()> {
        self.transition(ProcessState::Blocked)?;
        self.io_completion_time = Some(now + self.io_burst_duration);
        self.io_served = true;
        self.time_slice_remaining = None;
        Ok(())
    }

    /// BLOCKED -> READY, or BLOCKED -> TERMINATED when the CPU demand was
    /// already exhausted before the I/O phase started
    pub(crate) fn complete_io(&mut self) -> ProcessResult<ProcessState> {
        let completed_at = self.io_completion_time.ok_or_else(|| {
            ProcessError::InvalidStateTransition {
                pid: self.pid,
                from: self.state,
                to: ProcessState::Ready,
            }
        })?;

        if self.remaining_time == 0 {
            self.transition(ProcessState::Terminated)?;
            self.io_completion_time = None;
            self.record_finish(completed_at);
        } else {
            self.transition(ProcessState::Ready)?;
            self.io_completion_time = None;
            self.time_in_ready_queue = 0;
        }
        Ok(self.state)
    }

    /// RUNNING -> TERMINATED once the CPU demand reaches zero
    pub(crate) fn terminate(&mut self, now: Tick) -> ProcessResult<()> {
        if self.remaining_time != 0 || self.has_pending_io() {
            return Err(ProcessError::InvalidStateTransition {
                pid: self.pid,
                from: self.state,
                to: ProcessState::Terminated,
            });
        }
        self.transition(ProcessState::Terminated)?;
        self.time_slice_remaining = None;
        self.record_finish(now);
        Ok(())
    }

    fn record_finish(&mut self, finish: Tick) {
        debug_assert!(self.finish_time.is_none(), "finish time is written once");
        let turnaround = finish.saturating_sub(self.arrival_time);
        self.finish_time = Some(finish);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround.saturating_sub(self.burst_time));
    }

    /// Aging: promote one step toward `HIGHEST_PRIORITY` and restart the wait
    /// counter. Returns false when already at the top.
    pub(crate) fn promote(&mut self) -> bool {
        if self.current_priority <= HIGHEST_PRIORITY {
            return false;
        }
        self.current_priority -= 1;
        self.time_in_ready_queue = 0;
        true
    }
}
