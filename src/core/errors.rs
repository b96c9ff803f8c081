/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::types::{Pid, Tick};
use crate::process::ProcessState;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Process-record errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("Invalid process record {pid}: {reason}")]
    #[diagnostic(
        code(process::invalid_record),
        help("Every record needs a CPU burst of at least one tick.")
    )]
    InvalidRecord { pid: Pid, reason: String },

    #[error("Duplicate process id {0}")]
    #[diagnostic(
        code(process::duplicate_pid),
        help("Process ids must be unique within one workload.")
    )]
    DuplicatePid(Pid),

    #[error("Invalid state transition for process {pid}: {from:?} -> {to:?}")]
    #[diagnostic(
        code(process::invalid_transition),
        help("Only NEW->READY, READY<->RUNNING, RUNNING->BLOCKED, BLOCKED->READY and ->TERMINATED are legal.")
    )]
    InvalidStateTransition {
        pid: Pid,
        from: ProcessState,
        to: ProcessState,
    },
}

/// Scheduler configuration errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Invalid scheduling policy: {0}")]
    #[diagnostic(
        code(scheduler::invalid_policy),
        help("Use one of: fcfs, sjf, rr, prio-np, prio-p, edf, rm, mlq.")
    )]
    InvalidPolicy(String),

    #[error("Invalid quantum: {0} (must be at least 1 tick)")]
    #[diagnostic(
        code(scheduler::invalid_quantum),
        help("Round Robin and Multilevel Queue need a positive time quantum.")
    )]
    InvalidQuantum(Tick),
}

/// Workload production errors
#[derive(Error, Debug, Diagnostic)]
pub enum WorkloadError {
    #[error("Failed to read workload file {path}")]
    #[diagnostic(
        code(workload::io),
        help("Check that the file exists and is readable.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid generator parameter: {0}")]
    #[diagnostic(
        code(workload::invalid_parameter),
        help("Distribution parameters must be finite and positive where required.")
    )]
    InvalidParameter(String),
}

/// Configuration loading errors
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}")]
    #[diagnostic(code(config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed configuration: {0}")]
    #[diagnostic(
        code(config::decode),
        help("The configuration file must be a JSON object with SimulationConfig fields.")
    )]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Scheduler(#[from] SchedulerError),
}

/// Unified simulation error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum SimulationError {
    #[error("Process error: {0}")]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),

    #[error("Scheduler error: {0}")]
    #[diagnostic(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("Allocation failed: {0}")]
    #[diagnostic(
        code(simulation::allocation_failed),
        help("The workload is too large for available memory. Nothing was simulated.")
    )]
    AllocationFailed(String),
}

impl From<std::collections::TryReserveError> for SimulationError {
    fn from(err: std::collections::TryReserveError) -> Self {
        SimulationError::AllocationFailed(err.to_string())
    }
}
