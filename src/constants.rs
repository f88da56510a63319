// Fixed operational constants
//
// Centralized timeouts, intervals and thresholds so no magic numbers are
// scattered through the check loop.

use std::time::Duration;

/// Port probed on every configured domain (HTTPS default).
pub const TLS_PORT: u16 = 443;

/// Per-domain probe deadline covering TCP connect, TLS handshake and
/// certificate read.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Webhook dispatch deadline.
pub const NOTIFY_TIMEOUT: Duration = Duration::from_secs(3);

/// Time between check cycles (twice a day).
pub const CHECK_INTERVAL: Duration = Duration::from_secs(12 * 60 * 60);

/// Consecutive probe failures before a domain shows up in the failure
/// section of the alert.
pub const ERROR_ALERT_THRESHOLD: u32 = 5;

/// Lower bound for the configured expiry threshold, in days.
pub const MIN_EXPIRY_THRESHOLD_DAYS: u64 = 3;

/// Upper bound for the configured expiry threshold, in days.
pub const MAX_EXPIRY_THRESHOLD_DAYS: u64 = 30;

/// Title line of the aggregated alert card.
pub const ALERT_TITLE: &str = "Certification Error: Fired";

/// Footer note shown on every dispatched card.
pub const ALERT_FOOTER: &str = "cert-sentry";
