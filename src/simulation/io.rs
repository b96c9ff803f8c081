/*!
 * I/O Decision Models
 *
 * Whether an interrupted record goes off to I/O, and whether a running
 * record issues its I/O before its burst is done, are decisions injected
 * into the loop. Implementations are either fully deterministic or driven
 * by a seeded generator, so identical parameters replay identically.
 */

use crate::core::types::Tick;
use crate::process::ProcessRecord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Decision functions the loop consults for records with a pending I/O phase
pub trait IoModel: Send {
    /// A preempted record goes to BLOCKED (I/O request) instead of READY
    fn block_on_preemption(&mut self, record: &ProcessRecord, now: Tick) -> bool;

    /// A running record starts its I/O phase now, mid-burst
    fn start_io_mid_burst(&mut self, record: &ProcessRecord, now: Tick) -> bool;
}

/// Never diverts: I/O happens only after the CPU burst is exhausted
#[derive(Debug, Default, Clone, Copy)]
pub struct DeterministicIo;

impl IoModel for DeterministicIo {
    fn block_on_preemption(&mut self, _record: &ProcessRecord, _now: Tick) -> bool {
        false
    }

    fn start_io_mid_burst(&mut self, _record: &ProcessRecord, _now: Tick) -> bool {
        false
    }
}

/// Issues the I/O phase once half of the burst has run
#[derive(Debug, Default, Clone, Copy)]
pub struct MidpointIo;

impl IoModel for MidpointIo {
    fn block_on_preemption(&mut self, _record: &ProcessRecord, _now: Tick) -> bool {
        false
    }

    fn start_io_mid_burst(&mut self, record: &ProcessRecord, _now: Tick) -> bool {
        record.burst_time >= 2 && record.remaining_time() == record.burst_time / 2
    }
}

/// Bernoulli draws from a seeded generator
#[derive(Debug, Clone)]
pub struct SeededIo {
    rng: StdRng,
    preempt_block_chance: f64,
    mid_burst_chance: f64,
}

impl SeededIo {
    /// Chances are clamped into `[0, 1]`; NaN counts as zero
    pub fn new(seed: u64, preempt_block_chance: f64, mid_burst_chance: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            preempt_block_chance: clamp_probability(preempt_block_chance),
            mid_burst_chance: clamp_probability(mid_burst_chance),
        }
    }
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

impl IoModel for SeededIo {
    fn block_on_preemption(&mut self, _record: &ProcessRecord, _now: Tick) -> bool {
        self.rng.gen_bool(self.preempt_block_chance)
    }

    fn start_io_mid_burst(&mut self, _record: &ProcessRecord, _now: Tick) -> bool {
        self.rng.gen_bool(self.mid_burst_chance)
    }
}
