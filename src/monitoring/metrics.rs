/*!
 * Metrics Aggregator
 * Per-process and aggregate statistics computed once a run has halted
 */

use crate::core::serde::{is_false, is_zero_u64};
use crate::core::types::{Pid, Priority, Tick};
use crate::process::ProcessRecord;
use crate::scheduler::Policy;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt;

/// Loop-level counters the aggregator needs besides the records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunCounters {
    /// Clock value when the loop halted
    pub final_time: Tick,
    /// Ticks the CPU spent with nothing to run
    pub idle_time: Tick,
    /// Number of paid context switches
    pub context_switches: u64,
    /// Fixed cost of one switch, in ticks
    pub switch_cost: Tick,
    /// Dispatches that took the CPU from a running record
    pub preemptions: u64,
}

/// Final view of one record
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessMetrics {
    pub pid: Pid,
    pub arrival_time: Tick,
    pub burst_time: Tick,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub deadline: Tick,
    pub start_time: Option<Tick>,
    pub finish_time: Option<Tick>,
    pub turnaround_time: Option<Tick>,
    pub waiting_time: Option<Tick>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub deadline_missed: bool,
    pub completed: bool,
}

impl ProcessMetrics {
    /// Derive metrics from a record's final state
    ///
    /// Only TERMINATED records get turnaround and waiting values.
    #[must_use]
    pub fn from_record(record: &ProcessRecord) -> Self {
        let completed = record.is_terminated();
        let finish_time = if completed { record.finish_time() } else { None };
        let turnaround_time = finish_time.map(|f| f.saturating_sub(record.arrival_time));
        let waiting_time = turnaround_time.map(|t| t.saturating_sub(record.burst_time));

        Self {
            pid: record.pid,
            arrival_time: record.arrival_time,
            burst_time: record.burst_time,
            priority: record.priority,
            deadline: record.deadline,
            start_time: record.start_time(),
            finish_time,
            turnaround_time,
            waiting_time,
            deadline_missed: completed && record.missed_deadline(),
            completed,
        }
    }
}

/// Aggregate results of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationMetrics {
    pub policy: Policy,
    pub final_time: Tick,
    pub busy_time: Tick,
    pub idle_time: Tick,
    pub completed: usize,
    pub unfinished: usize,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub cpu_utilization: f64,
    pub throughput: f64,
    pub deadline_misses: usize,
    pub context_switches: u64,
    pub context_switch_overhead: Tick,
    pub preemptions: u64,
    pub processes: Vec<ProcessMetrics>,
}

impl SimulationMetrics {
    /// Aggregate over completed records only; unfinished records are
    /// reported per process but never zero-filled into the means
    #[must_use]
    pub fn aggregate(policy: Policy, records: &[ProcessRecord], counters: &RunCounters) -> Self {
        let processes: Vec<ProcessMetrics> = records.iter().map(ProcessMetrics::from_record).collect();

        let finished: Vec<&ProcessMetrics> = processes.iter().filter(|p| p.completed).collect();
        let completed = finished.len();

        let mean = |values: &mut dyn Iterator<Item = Tick>| -> f64 {
            if completed == 0 {
                0.0
            } else {
                values.map(|v| v as f64).sum::<f64>() / completed as f64
            }
        };
        let average_waiting_time = mean(&mut finished.iter().filter_map(|p| p.waiting_time));
        let average_turnaround_time = mean(&mut finished.iter().filter_map(|p| p.turnaround_time));

        let final_time = counters.final_time;
        let busy_time = final_time.saturating_sub(counters.idle_time);
        let (cpu_utilization, throughput) = if final_time == 0 {
            (0.0, 0.0)
        } else {
            (
                busy_time as f64 / final_time as f64,
                completed as f64 / final_time as f64,
            )
        };

        Self {
            policy,
            final_time,
            busy_time,
            idle_time: counters.idle_time,
            completed,
            unfinished: processes.len() - completed,
            average_waiting_time,
            average_turnaround_time,
            cpu_utilization,
            throughput,
            deadline_misses: finished.iter().filter(|p| p.deadline_missed).count(),
            context_switches: counters.context_switches,
            context_switch_overhead: counters.context_switches * counters.switch_cost,
            preemptions: counters.preemptions,
            processes,
        }
    }

    /// Metrics of one process by pid
    pub fn process(&self, pid: Pid) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|p| p.pid == pid)
    }
}

impl fmt::Display for SimulationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PID | Arrival | Burst | Prio | Start | Finish | Turnaround | Waiting | Deadline")?;
        for p in &self.processes {
            let opt = |v: Option<Tick>| v.map_or_else(|| "-".to_string(), |t| t.to_string());
            writeln!(
                f,
                "P{:<2} | {:>7} | {:>5} | {:>4} | {:>5} | {:>6} | {:>10} | {:>7} | {:>8}{}",
                p.pid,
                p.arrival_time,
                p.burst_time,
                p.priority,
                opt(p.start_time),
                opt(p.finish_time),
                opt(p.turnaround_time),
                opt(p.waiting_time),
                p.deadline,
                if p.deadline_missed { " (missed)" } else { "" }
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Policy:              {}", self.policy)?;
        writeln!(f, "Completed:           {} ({} unfinished)", self.completed, self.unfinished)?;
        writeln!(f, "Simulated time:      {} (busy {}, idle {})", self.final_time, self.busy_time, self.idle_time)?;
        writeln!(f, "Avg waiting time:    {:.2}", self.average_waiting_time)?;
        writeln!(f, "Avg turnaround time: {:.2}", self.average_turnaround_time)?;
        writeln!(f, "CPU utilization:     {:.2}%", self.cpu_utilization * 100.0)?;
        writeln!(f, "Throughput:          {:.4} proc/tick", self.throughput)?;
        writeln!(f, "Deadline misses:     {}", self.deadline_misses)?;
        write!(
            f,
            "Context switches:    {} (overhead {} ticks, {} preemptions)",
            self.context_switches, self.context_switch_overhead, self.preemptions
        )
    }
}
