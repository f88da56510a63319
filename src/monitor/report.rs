// Cycle outcome types
//
// A CycleReport is rebuilt from the check loop's state maps after every cycle
// and handed to the notification layer for rendering. It is never persisted.

use chrono::Duration;

/// Aggregated outcome of one check cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Domains whose certificate lifetime is at or below the threshold,
    /// in configured domain order
    pub expiring: Vec<ExpiringEntry>,
    /// Domains whose consecutive-error count crossed the alert threshold,
    /// in configured domain order
    pub failing: Vec<FailingEntry>,
}

impl CycleReport {
    /// True when the cycle warrants no alert
    pub fn is_empty(&self) -> bool {
        self.expiring.is_empty() && self.failing.is_empty()
    }
}

/// A domain close to certificate expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiringEntry {
    pub domain: String,
    /// Remaining lifetime as of the last successful probe. Signed: an already
    /// expired certificate reports negative days.
    pub remaining: Duration,
}

impl ExpiringEntry {
    /// Whole days remaining, truncated toward zero
    pub fn remaining_days(&self) -> i64 {
        self.remaining.num_hours() / 24
    }
}

/// A domain whose probes keep failing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailingEntry {
    pub domain: String,
    pub count: u32,
}
