/*!
 * Selection Strategy Traits
 * Interface the simulation loop drives every scheduling decision through
 */

use super::types::{AgingConfig, Policy};
use crate::core::types::{Tick, Slot};
use crate::process::{ProcessRecord, ProcessTable};

/// One scheduling policy's decision logic
///
/// Strategies hold slot indices, never references into the table.
pub trait SelectionStrategy: Send {
    /// Policy this strategy implements
    fn policy(&self) -> Policy;

    /// One-time setup before the first tick (band assignment and the like)
    fn prepare(&mut self, _table: &mut ProcessTable) {}

    /// Best READY candidate at `now`, if any
    fn select_next(&self, table: &ProcessTable, now: Tick) -> Option<Slot>;

    /// Whether `candidate` must take the CPU from `running` right now
    fn preempts(&self, _table: &ProcessTable, _running: Slot, _candidate: Slot) -> bool {
        false
    }

    /// Quantum to load when `record` is dispatched; `None` runs unsliced
    fn quantum_for(&self, _record: &ProcessRecord) -> Option<Tick> {
        None
    }

    /// Aging parameters when this strategy ages READY records
    fn aging(&self) -> Option<AgingConfig> {
        None
    }

    /// Bookkeeping after `slot` was dispatched
    fn on_dispatch(&mut self, _slot: Slot, _record: &ProcessRecord) {}
}
