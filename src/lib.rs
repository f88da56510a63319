// cert-sentry - TLS certificate expiration monitor with webhook alerting
// Licensed under GPL-3.0

//! cert-sentry periodically probes the TLS certificates of a configured set of
//! domains and dispatches at most one aggregated Feishu card per check cycle
//! when a certificate is close to expiry or a domain's checks keep failing.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod monitor;
pub mod notify;
pub mod probe;

// Re-export commonly used types
pub use crate::cli::Args;
pub use crate::config::Config;
pub use crate::monitor::MonitorDaemon;

/// Result type for cert-sentry operations
pub type Result<T> = anyhow::Result<T>;

/// Error type for cert-sentry operations
pub use anyhow::Error;
