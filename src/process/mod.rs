/*!
 * Process Module
 * Process records, their state machine, and the run-owned arena
 */

pub mod lifecycle;
pub mod table;
pub mod types;

// Re-export for convenience
pub use table::ProcessTable;
pub use types::{ProcessRecord, ProcessResult, ProcessState};
