/*!
 * Workload Generator
 * Static and seeded random process sets
 *
 * Random workloads draw exponential inter-arrival gaps and a configurable
 * burst distribution from one `StdRng`, so a seed fully determines the
 * output.
 */

use crate::core::errors::WorkloadError;
use crate::core::limits::{
    BASE_RELATIVE_DEADLINE, DEADLINE_SLACK, DEFAULT_BURST_MEAN, DEFAULT_BURST_STDDEV,
    DEFAULT_LAMBDA, DEFAULT_PROCESS_COUNT, HIGHEST_PRIORITY, LOWEST_PRIORITY,
};
use crate::core::types::{Pid, Priority, Tick};
use crate::process::ProcessRecord;
use rand::distributions::{Uniform, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Normal};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fixed, reproducible workload
///
/// Record `i` (0-based) arrives at `2i` with burst `5 + i % 3`, priority
/// `1 + i % 5` and an absolute deadline ten ticks after arrival.
pub fn generate_static(count: usize) -> Vec<ProcessRecord> {
    (0..count)
        .map(|i| {
            let arrival = 2 * i as Tick;
            ProcessRecord::new(i as Pid + 1, arrival, 5 + (i % 3) as Tick)
                .with_priority(1 + (i % 5) as Priority)
                .with_deadline(arrival + BASE_RELATIVE_DEADLINE)
        })
        .collect()
}

/// How CPU bursts are drawn; samples are truncated and clamped to at least 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BurstDistribution {
    Normal { mean: f64, stddev: f64 },
    Uniform { min: Tick, max: Tick },
    Exponential { mean: f64 },
}

impl Default for BurstDistribution {
    fn default() -> Self {
        Self::Normal {
            mean: DEFAULT_BURST_MEAN,
            stddev: DEFAULT_BURST_STDDEV,
        }
    }
}

/// How static priorities are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityDistribution {
    /// Every level in `1..=5` equally likely
    #[default]
    Uniform,
    /// Weighted toward low urgency (larger numbers)
    Biased,
}

/// Optional single I/O phase per record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct IoProfile {
    /// Probability that a record gets an I/O phase
    pub chance: f64,
    pub min_duration: Tick,
    pub max_duration: Tick,
}

impl Default for IoProfile {
    fn default() -> Self {
        Self {
            chance: 0.0,
            min_duration: 1,
            max_duration: 5,
        }
    }
}

/// Parameters of a seeded random workload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RandomWorkload {
    pub count: usize,
    pub seed: u64,
    /// Rate of the exponential inter-arrival distribution
    pub lambda: f64,
    pub burst: BurstDistribution,
    pub priority: PriorityDistribution,
    pub io: IoProfile,
}

impl Default for RandomWorkload {
    fn default() -> Self {
        Self {
            count: DEFAULT_PROCESS_COUNT,
            seed: 0,
            lambda: DEFAULT_LAMBDA,
            burst: BurstDistribution::default(),
            priority: PriorityDistribution::default(),
            io: IoProfile::default(),
        }
    }
}

enum BurstSampler {
    Normal(Normal<f64>),
    Uniform(Uniform<Tick>),
    Exponential(Exp<f64>),
}

impl BurstSampler {
    fn sample(&self, rng: &mut StdRng) -> Tick {
        let raw = match self {
            Self::Normal(dist) => dist.sample(rng),
            Self::Uniform(dist) => return dist.sample(rng).max(1),
            Self::Exponential(dist) => dist.sample(rng),
        };
        (raw.trunc() as Tick).max(1)
    }
}

fn invalid(message: impl Into<String>) -> WorkloadError {
    WorkloadError::InvalidParameter(message.into())
}

impl RandomWorkload {
    fn burst_sampler(&self) -> Result<BurstSampler, WorkloadError> {
        match self.burst {
            BurstDistribution::Normal { mean, stddev } => Normal::new(mean, stddev)
                .map(BurstSampler::Normal)
                .map_err(|e| invalid(format!("normal burst ({}, {}): {}", mean, stddev, e))),
            BurstDistribution::Uniform { min, max } => {
                if min == 0 || min > max {
                    return Err(invalid(format!("uniform burst range [{}, {}]", min, max)));
                }
                Ok(BurstSampler::Uniform(Uniform::new_inclusive(min, max)))
            }
            BurstDistribution::Exponential { mean } => {
                if !(mean.is_finite() && mean > 0.0) {
                    return Err(invalid(format!("exponential burst mean {}", mean)));
                }
                Exp::new(1.0 / mean)
                    .map(BurstSampler::Exponential)
                    .map_err(|e| invalid(format!("exponential burst mean {}: {}", mean, e)))
            }
        }
    }

    fn validate_io(&self) -> Result<(), WorkloadError> {
        let io = &self.io;
        if !(0.0..=1.0).contains(&io.chance) {
            return Err(invalid(format!("io chance {} outside [0, 1]", io.chance)));
        }
        if io.chance > 0.0 && (io.min_duration == 0 || io.min_duration > io.max_duration) {
            return Err(invalid(format!(
                "io duration range [{}, {}]",
                io.min_duration, io.max_duration
            )));
        }
        Ok(())
    }

    /// Draw `count` records
    pub fn generate(&self) -> Result<Vec<ProcessRecord>, WorkloadError> {
        if !(self.lambda.is_finite() && self.lambda > 0.0) {
            return Err(invalid(format!("lambda must be positive, got {}", self.lambda)));
        }
        self.validate_io()?;

        let arrivals = Exp::new(self.lambda).map_err(|e| invalid(format!("lambda {}: {}", self.lambda, e)))?;
        let bursts = self.burst_sampler()?;
        let priorities = match self.priority {
            PriorityDistribution::Uniform => None,
            PriorityDistribution::Biased => Some(
                WeightedIndex::new(HIGHEST_PRIORITY..=LOWEST_PRIORITY)
                    .map_err(|e| invalid(format!("priority weights: {}", e)))?,
            ),
        };

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut clock = 0.0_f64;
        let mut records = Vec::new();
        records
            .try_reserve_exact(self.count)
            .map_err(|e| invalid(format!("cannot allocate {} records: {}", self.count, e)))?;

        for i in 0..self.count {
            clock += arrivals.sample(&mut rng);
            let arrival = clock as Tick;
            let burst = bursts.sample(&mut rng);
            let priority = match &priorities {
                None => rng.gen_range(HIGHEST_PRIORITY..=LOWEST_PRIORITY),
                Some(weights) => HIGHEST_PRIORITY + weights.sample(&mut rng) as Priority,
            };
            let relative_deadline = BASE_RELATIVE_DEADLINE + rng.gen_range(0..DEADLINE_SLACK);

            let mut record = ProcessRecord::new(i as Pid + 1, arrival, burst)
                .with_priority(priority)
                .with_deadline(arrival + relative_deadline)
                .with_period(relative_deadline);

            if self.io.chance > 0.0 && rng.gen_bool(self.io.chance) {
                record = record.with_io(rng.gen_range(self.io.min_duration..=self.io.max_duration));
            }
            records.push(record);
        }

        debug!(count = self.count, seed = self.seed, "random workload generated");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_workload_shape() {
        let records = generate_static(6);
        let bursts: Vec<Tick> = records.iter().map(|r| r.burst_time).collect();
        let priorities: Vec<Priority> = records.iter().map(|r| r.priority).collect();
        assert_eq!(bursts, vec![5, 6, 7, 5, 6, 7]);
        assert_eq!(priorities, vec![1, 2, 3, 4, 5, 1]);
        assert_eq!(records[3].arrival_time, 6);
        assert_eq!(records[3].deadline, 16);
        assert_eq!(records[3].pid, 4);
    }

    #[test]
    fn test_random_workload_is_seed_deterministic() {
        let params = RandomWorkload {
            count: 20,
            seed: 7,
            io: IoProfile {
                chance: 0.5,
                min_duration: 2,
                max_duration: 4,
            },
            ..RandomWorkload::default()
        };
        assert_eq!(params.generate().unwrap(), params.generate().unwrap());

        let other = RandomWorkload { seed: 8, ..params };
        assert_ne!(params.generate().unwrap(), other.generate().unwrap());
    }

    #[test]
    fn test_random_workload_invariants() {
        for burst in [
            BurstDistribution::default(),
            BurstDistribution::Uniform { min: 2, max: 9 },
            BurstDistribution::Exponential { mean: 4.0 },
        ] {
            let params = RandomWorkload {
                count: 50,
                seed: 3,
                burst,
                priority: PriorityDistribution::Biased,
                io: IoProfile {
                    chance: 0.3,
                    min_duration: 1,
                    max_duration: 3,
                },
                ..RandomWorkload::default()
            };
            let records = params.generate().unwrap();
            assert_eq!(records.len(), 50);

            let mut last_arrival = 0;
            for record in &records {
                assert!(record.burst_time >= 1);
                assert!((HIGHEST_PRIORITY..=LOWEST_PRIORITY).contains(&record.priority));
                assert!(record.arrival_time >= last_arrival);
                assert_eq!(record.deadline - record.arrival_time, record.period);
                assert!(record.period >= BASE_RELATIVE_DEADLINE);
                assert!(record.io_burst_duration <= 3);
                last_arrival = record.arrival_time;
            }
        }
    }

    #[test]
    fn test_invalid_parameters() {
        let bad = [
            RandomWorkload {
                lambda: 0.0,
                ..RandomWorkload::default()
            },
            RandomWorkload {
                burst: BurstDistribution::Normal { mean: 5.0, stddev: -1.0 },
                ..RandomWorkload::default()
            },
            RandomWorkload {
                burst: BurstDistribution::Uniform { min: 9, max: 2 },
                ..RandomWorkload::default()
            },
            RandomWorkload {
                burst: BurstDistribution::Exponential { mean: 0.0 },
                ..RandomWorkload::default()
            },
            RandomWorkload {
                io: IoProfile {
                    chance: 1.5,
                    ..IoProfile::default()
                },
                ..RandomWorkload::default()
            },
        ];
        for params in bad {
            assert!(matches!(params.generate(), Err(WorkloadError::InvalidParameter(_))));
        }
    }
}
