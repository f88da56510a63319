// Error types for cert-sentry
//
// Structured error types using thiserror. Probe errors are per-domain and
// recovered by counting; configuration errors are fatal at startup.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Errors produced by a single certificate probe.
///
/// All variants are treated as transient by the check loop: the probe is
/// retried naturally on the next cycle and only the consecutive-error counter
/// records the failure.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Domain is not a valid TLS server name
    #[error("invalid server name {domain:?}")]
    InvalidServerName { domain: String },

    /// TCP connection failed
    #[error("connection to {domain} failed: {source}")]
    Connection {
        domain: String,
        #[source]
        source: io::Error,
    },

    /// TLS handshake failed
    #[error("TLS handshake with {domain} failed: {source}")]
    Handshake {
        domain: String,
        #[source]
        source: io::Error,
    },

    /// Connect or handshake exceeded the probe deadline
    #[error("probe of {domain} timed out after {timeout:?}")]
    Timeout { domain: String, timeout: Duration },

    /// Handshake succeeded but the server presented zero certificates
    #[error("no tls certification presented by {domain}")]
    NoCertificate { domain: String },

    /// Leaf certificate could not be parsed
    #[error("failed to parse certificate from {domain}: {details}")]
    BadCertificate { domain: String, details: String },
}

/// Configuration errors, surfaced once at startup before the loop begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Config file is not valid TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Domain list is empty
    #[error("no any domain configured")]
    NoDomains,

    /// `before_expired` is not a parseable duration
    #[error("invalid before_expired {value:?}: {details}")]
    InvalidThreshold { value: String, details: String },

    /// `before_expired` falls outside the accepted window
    #[error("invalid before_expired {value:?}: should be between 3 and 30 days")]
    ThresholdOutOfRange { value: String },

    /// `notify_url` is not a valid URL
    #[error("invalid notify_url {value:?}: {source}")]
    InvalidNotifyUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}
