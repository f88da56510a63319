// cert-sentry - TLS certificate expiration monitor with webhook alerting
// Licensed under GPL-3.0
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, version 3.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

use anyhow::Result;
use cert_sentry::monitor::ShutdownHandle;
use cert_sentry::notify::{FeishuChannel, Notifier};
use cert_sentry::probe::TlsProber;
use cert_sentry::{Args, Config, MonitorDaemon};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize logging - respect RUST_LOG environment variable
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let args = Args::parse();

    let config = Config::from_file(&args.config)?;
    info!(
        file = %args.config.display(),
        domains = config.domains.len(),
        threshold_days = config.before_expired.num_days(),
        "Config"
    );

    let notifier = Arc::new(FeishuChannel::new(config.notify_url.clone())?);

    if args.test_alert {
        notifier.test_connection().await?;
        info!("Test alert delivered");
        return Ok(());
    }

    let mut daemon = MonitorDaemon::new(&config, Arc::new(TlsProber::new()), notifier);
    spawn_signal_handler(daemon.shutdown_handle());

    daemon.start().await
}

/// Trigger shutdown on process signals
fn spawn_signal_handler(handle: ShutdownHandle) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigterm =
                signal(SignalKind::terminate()).expect("Failed to setup SIGTERM handler");
            let mut sigint =
                signal(SignalKind::interrupt()).expect("Failed to setup SIGINT handler");
            let mut sighup = signal(SignalKind::hangup()).expect("Failed to setup SIGHUP handler");
            let mut sigquit = signal(SignalKind::quit()).expect("Failed to setup SIGQUIT handler");

            tokio::select! {
                _ = sigterm.recv() => tracing::info!("Received SIGTERM"),
                _ = sigint.recv() => tracing::info!("Received SIGINT"),
                _ = sighup.recv() => tracing::info!("Received SIGHUP"),
                _ = sigquit.recv() => tracing::info!("Received SIGQUIT"),
            }

            handle.stop();
        }

        #[cfg(not(unix))]
        {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to setup Ctrl+C handler");

            tracing::info!("Received Ctrl+C");
            handle.stop();
        }
    });
}
