/*!
 * Simulation Configuration
 * Serializable run parameters and their JSON file loader
 */

use super::io::{DeterministicIo, IoModel, SeededIo};
use crate::core::errors::ConfigError;
use crate::core::limits::DEFAULT_CONTEXT_SWITCH_COST;
use crate::core::types::{Tick, TimeCap};
use crate::scheduler::{Policy, SchedulerConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// When a record's I/O phase may begin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IoTiming {
    /// Only once the CPU demand is exhausted
    #[default]
    AfterBurst,
    /// Also mid-burst, whenever the I/O model decides so
    MidBurst,
}

/// Parameters of the seed-derived I/O model
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct IoModelConfig {
    pub seed: u64,
    /// Chance that a preempted record with pending I/O blocks instead of requeueing
    pub preempt_block_chance: f64,
    /// Per-tick chance that a running record starts its I/O mid-burst
    pub mid_burst_chance: f64,
}

impl IoModelConfig {
    /// Deterministic model when every chance is zero, seeded model otherwise
    pub fn build(&self) -> Box<dyn IoModel> {
        if self.preempt_block_chance > 0.0 || self.mid_burst_chance > 0.0 {
            Box::new(SeededIo::new(
                self.seed,
                self.preempt_block_chance,
                self.mid_burst_chance,
            ))
        } else {
            Box::new(DeterministicIo)
        }
    }
}

/// Everything one run needs besides the records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SimulationConfig {
    pub policy: Policy,
    #[serde(flatten)]
    pub scheduler: SchedulerConfig,
    pub time_cap: TimeCap,
    pub context_switch_cost: Tick,
    pub io_timing: IoTiming,
    pub io: IoModelConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            policy: Policy::Fcfs,
            scheduler: SchedulerConfig::default(),
            time_cap: TimeCap::Unbounded,
            context_switch_cost: DEFAULT_CONTEXT_SWITCH_COST,
            io_timing: IoTiming::AfterBurst,
            io: IoModelConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let config = SimulationConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_flattened_scheduler_fields() {
        let config = SimulationConfig::from_json_str(
            r#"{"policy":"mlq","quantum":3,"aging_enabled":false,"time_cap":50,
                "io_timing":"mid-burst","io":{"seed":9,"mid_burst_chance":0.25}}"#,
        )
        .unwrap();
        assert_eq!(config.policy, Policy::MultilevelQueue);
        assert_eq!(config.scheduler.quantum.ticks(), 3);
        assert!(!config.scheduler.aging_enabled);
        assert_eq!(config.time_cap, TimeCap::At(50));
        assert_eq!(config.io_timing, IoTiming::MidBurst);
        assert_eq!(config.io.seed, 9);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(SimulationConfig::from_json_str(r#"{"quantum":0}"#).is_err());
        assert!(SimulationConfig::from_json_str(r#"{"policy":"lottery"}"#).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = SimulationConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
