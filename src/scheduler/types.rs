/*!
 * Scheduler Types
 * Domain types for policy selection and policy parameters
 */

use crate::core::errors::SchedulerError;
use crate::core::limits::{AGING_INTERVAL, AGING_THRESHOLD, DEFAULT_QUANTUM};
use crate::core::types::Tick;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Scheduling policy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// First-Come First-Served, non-preemptive
    Fcfs,
    /// Shortest Job First on original burst, non-preemptive
    Sjf,
    /// Round Robin with a fixed quantum
    RoundRobin,
    /// Static-priority, non-preemptive, with aging
    PriorityNonPreemptive,
    /// Static-priority, preemptive, with aging
    PriorityPreemptive,
    /// Earliest Deadline First, preemptive
    Edf,
    /// Rate-Monotonic on the priority field, preemptive, no aging
    RateMonotonic,
    /// Three-band Multilevel Queue (RR q, RR 2q, FCFS)
    MultilevelQueue,
}

impl Policy {
    /// Every policy, in CLI listing order
    pub const ALL: [Policy; 8] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::RoundRobin,
        Policy::PriorityNonPreemptive,
        Policy::PriorityPreemptive,
        Policy::Edf,
        Policy::RateMonotonic,
        Policy::MultilevelQueue,
    ];

    /// Convert to string representation
    ///
    /// # Performance
    /// Hot path - frequently called for logging and serialization
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::RoundRobin => "rr",
            Self::PriorityNonPreemptive => "prio-np",
            Self::PriorityPreemptive => "prio-p",
            Self::Edf => "edf",
            Self::RateMonotonic => "rm",
            Self::MultilevelQueue => "mlq",
        }
    }

    /// Whether a running record can lose the CPU to a better candidate
    #[inline]
    pub const fn is_preemptive(&self) -> bool {
        matches!(
            self,
            Self::PriorityPreemptive | Self::Edf | Self::RateMonotonic | Self::MultilevelQueue
        )
    }

    /// Whether the policy consumes the base quantum
    #[inline]
    pub const fn uses_quantum(&self) -> bool {
        matches!(self, Self::RoundRobin | Self::MultilevelQueue)
    }

    /// Whether the policy runs priority aging (when enabled)
    #[inline]
    pub const fn supports_aging(&self) -> bool {
        matches!(self, Self::PriorityNonPreemptive | Self::PriorityPreemptive)
    }
}

impl FromStr for Policy {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "rr" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            "prio-np" | "priority_np" => Ok(Self::PriorityNonPreemptive),
            "prio-p" | "priority_p" | "priority" => Ok(Self::PriorityPreemptive),
            "edf" => Ok(Self::Edf),
            "rm" | "rate_monotonic" => Ok(Self::RateMonotonic),
            "mlq" | "multilevel" => Ok(Self::MultilevelQueue),
            _ => Err(SchedulerError::InvalidPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Policy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Time quantum in ticks, always at least one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimeQuantum(Tick);

impl TimeQuantum {
    /// Create new time quantum
    pub fn new(ticks: Tick) -> Result<Self, SchedulerError> {
        if ticks == 0 {
            return Err(SchedulerError::InvalidQuantum(ticks));
        }
        Ok(Self(ticks))
    }

    /// Get ticks
    ///
    /// # Performance
    /// Hot path - read on every quantum-policy dispatch
    #[inline(always)]
    pub const fn ticks(&self) -> Tick {
        self.0
    }
}

impl Default for TimeQuantum {
    fn default() -> Self {
        Self(DEFAULT_QUANTUM)
    }
}

impl<'de> Deserialize<'de> for TimeQuantum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ticks = Tick::deserialize(deserializer)?;
        Self::new(ticks).map_err(serde::de::Error::custom)
    }
}

/// Aging parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AgingConfig {
    /// Ticks between aging passes
    pub interval: Tick,
    /// Ticks a READY record must have waited to be promoted
    pub threshold: Tick,
}

impl Default for AgingConfig {
    fn default() -> Self {
        Self {
            interval: AGING_INTERVAL,
            threshold: AGING_THRESHOLD,
        }
    }
}

/// Per-policy numeric parameters handed to strategy construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SchedulerConfig {
    /// Base quantum for Round Robin and Multilevel Queue
    pub quantum: TimeQuantum,
    /// Whether priority policies run aging passes
    pub aging_enabled: bool,
    pub aging: AgingConfig,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            quantum: TimeQuantum::default(),
            aging_enabled: true,
            aging: AgingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!("fcfs".parse::<Policy>().unwrap(), Policy::Fcfs);
        assert_eq!("RR".parse::<Policy>().unwrap(), Policy::RoundRobin);
        assert_eq!("prio-np".parse::<Policy>().unwrap(), Policy::PriorityNonPreemptive);
        assert_eq!("mlq".parse::<Policy>().unwrap(), Policy::MultilevelQueue);
        assert!("lottery".parse::<Policy>().is_err());
    }

    #[test]
    fn test_policy_names_round_trip() {
        for policy in Policy::ALL {
            assert_eq!(policy.as_str().parse::<Policy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_policy_serde_uses_cli_names() {
        let json = serde_json::to_string(&Policy::RateMonotonic).unwrap();
        assert_eq!(json, "\"rm\"");
        let back: Policy = serde_json::from_str("\"prio-p\"").unwrap();
        assert_eq!(back, Policy::PriorityPreemptive);
    }

    #[test]
    fn test_time_quantum_validation() {
        assert!(TimeQuantum::new(0).is_err());
        assert_eq!(TimeQuantum::new(3).unwrap().ticks(), 3);
        assert!(serde_json::from_str::<TimeQuantum>("0").is_err());
    }

    #[test]
    fn test_policy_traits() {
        assert!(!Policy::Fcfs.is_preemptive());
        assert!(Policy::Edf.is_preemptive());
        assert!(Policy::MultilevelQueue.uses_quantum());
        assert!(Policy::PriorityNonPreemptive.supports_aging());
        assert!(!Policy::RateMonotonic.supports_aging());
    }
}
