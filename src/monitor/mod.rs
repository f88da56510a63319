// Certificate check loop
//
// Owns the per-domain state that carries across check cycles (near-expiry
// entries and consecutive-error counts) and turns it into at most one
// aggregated alert per cycle.

pub mod daemon;
pub mod report;

// Re-export commonly used types
pub use daemon::{CycleOutcome, MonitorDaemon, ShutdownHandle};
pub use report::{CycleReport, ExpiringEntry, FailingEntry};
