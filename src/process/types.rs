/*!
 * Process Types
 * Per-process record and its lifecycle state
 */

use crate::core::serde::{is_false, is_zero_u64, tick_or_sentinel};
use crate::core::types::{Pid, Priority, Tick};
use serde::{Deserialize, Serialize};

/// Process operation result
pub type ProcessResult<T> = Result<T, crate::core::errors::ProcessError>;

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Created by the workload producer, not yet arrived
    New,
    /// Arrived and waiting for the CPU
    Ready,
    /// Holding the CPU
    Running,
    /// Waiting for an I/O phase to complete
    Blocked,
    /// Finished; finish time is final
    Terminated,
}

impl ProcessState {
    /// Whether the state machine allows `self -> to`
    #[inline]
    #[must_use]
    pub const fn can_transition_to(self, to: ProcessState) -> bool {
        matches!(
            (self, to),
            (Self::New, Self::Ready)
                | (Self::Ready, Self::Running)
                | (Self::Running, Self::Ready)
                | (Self::Running, Self::Blocked)
                | (Self::Running, Self::Terminated)
                | (Self::Blocked, Self::Ready)
                | (Self::Blocked, Self::Terminated)
        )
    }

    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Blocked => "blocked",
            Self::Terminated => "terminated",
        }
    }
}

/// Process record
///
/// Descriptive fields (`pid` through `io_burst_duration`) come from the
/// workload producer and never change. The remaining fields are owned by a
/// simulation run and only move through the lifecycle methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessRecord {
    pub pid: Pid,
    pub arrival_time: Tick,
    pub burst_time: Tick,
    pub priority: Priority,
    pub deadline: Tick,
    pub period: Tick,
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub io_burst_duration: Tick,

    pub(crate) state: ProcessState,
    pub(crate) remaining_time: Tick,
    pub(crate) current_priority: Priority,
    #[serde(with = "tick_or_sentinel")]
    pub(crate) start_time: Option<Tick>,
    #[serde(with = "tick_or_sentinel")]
    pub(crate) finish_time: Option<Tick>,
    #[serde(with = "tick_or_sentinel")]
    pub(crate) waiting_time: Option<Tick>,
    #[serde(with = "tick_or_sentinel")]
    pub(crate) turnaround_time: Option<Tick>,
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub(crate) time_in_ready_queue: Tick,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) time_slice_remaining: Option<Tick>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) current_queue: Option<usize>,
    #[serde(with = "tick_or_sentinel")]
    pub(crate) io_completion_time: Option<Tick>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub(crate) io_served: bool,
}

impl ProcessRecord {
    /// Create a record with priority 1, no deadline and no I/O phase
    #[inline]
    #[must_use]
    pub fn new(pid: Pid, arrival_time: Tick, burst_time: Tick) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            priority: 1,
            deadline: 0,
            period: 0,
            io_burst_duration: 0,
            state: ProcessState::New,
            remaining_time: burst_time,
            current_priority: 1,
            start_time: None,
            finish_time: None,
            waiting_time: None,
            turnaround_time: None,
            time_in_ready_queue: 0,
            time_slice_remaining: None,
            current_queue: None,
            io_completion_time: None,
            io_served: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self.current_priority = priority;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_deadline(mut self, deadline: Tick) -> Self {
        self.deadline = deadline;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_period(mut self, period: Tick) -> Self {
        self.period = period;
        self
    }

    /// Attach an I/O phase of `duration` ticks
    #[inline]
    #[must_use]
    pub fn with_io(mut self, duration: Tick) -> Self {
        self.io_burst_duration = duration;
        self
    }

    /// Return every run-owned field to its pre-simulation value
    pub(crate) fn reset(&mut self) {
        self.state = ProcessState::New;
        self.remaining_time = self.burst_time;
        self.current_priority = self.priority;
        self.start_time = None;
        self.finish_time = None;
        self.waiting_time = None;
        self.turnaround_time = None;
        self.time_in_ready_queue = 0;
        self.time_slice_remaining = None;
        self.current_queue = None;
        self.io_completion_time = None;
        self.io_served = false;
    }

    #[inline(always)]
    #[must_use]
    pub const fn state(&self) -> ProcessState {
        self.state
    }

    #[inline(always)]
    #[must_use]
    pub const fn remaining_time(&self) -> Tick {
        self.remaining_time
    }

    #[inline(always)]
    #[must_use]
    pub const fn current_priority(&self) -> Priority {
        self.current_priority
    }

    #[inline]
    #[must_use]
    pub const fn start_time(&self) -> Option<Tick> {
        self.start_time
    }

    #[inline]
    #[must_use]
    pub const fn finish_time(&self) -> Option<Tick> {
        self.finish_time
    }

    #[inline]
    #[must_use]
    pub const fn waiting_time(&self) -> Option<Tick> {
        self.waiting_time
    }

    #[inline]
    #[must_use]
    pub const fn turnaround_time(&self) -> Option<Tick> {
        self.turnaround_time
    }

    #[inline]
    #[must_use]
    pub const fn time_in_ready_queue(&self) -> Tick {
        self.time_in_ready_queue
    }

    #[inline]
    #[must_use]
    pub const fn time_slice_remaining(&self) -> Option<Tick> {
        self.time_slice_remaining
    }

    /// Multilevel Queue band, once assigned
    #[inline]
    #[must_use]
    pub const fn current_queue(&self) -> Option<usize> {
        self.current_queue
    }

    #[inline]
    #[must_use]
    pub const fn io_completion_time(&self) -> Option<Tick> {
        self.io_completion_time
    }

    /// Check if record is ready
    ///
    /// # Performance
    /// Hot path - every selection strategy filters on it
    #[inline(always)]
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.state, ProcessState::Ready)
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, ProcessState::Running)
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        matches!(self.state, ProcessState::Terminated)
    }

    /// Whether the single I/O phase is still owed once the CPU demand runs out
    #[inline]
    #[must_use]
    pub const fn has_pending_io(&self) -> bool {
        self.io_burst_duration > 0 && !self.io_served
    }

    /// Whether the record finished after its (non-zero) deadline
    #[inline]
    #[must_use]
    pub fn missed_deadline(&self) -> bool {
        match self.finish_time {
            Some(finish) => self.deadline > 0 && finish > self.deadline,
            None => false,
        }
    }
}
