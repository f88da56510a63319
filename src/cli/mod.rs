// CLI module - Command line interface and argument parsing

use clap::Parser;
use std::path::PathBuf;

/// cert-sentry - TLS certificate expiration monitor
#[derive(Parser, Debug, Clone)]
#[command(author, version, long_about = None)]
#[command(name = "cert-sentry")]
#[command(about = "TLS certificate expiration monitor with webhook alerting")]
pub struct Args {
    /// Configuration file (TOML format)
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,

    /// Send a test message through the configured webhook and exit
    #[arg(long = "test-alert")]
    pub test_alert: bool,
}
