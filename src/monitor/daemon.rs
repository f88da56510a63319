// Monitoring Daemon - the periodic check-and-alert loop

use crate::config::Config;
use crate::constants::{ALERT_FOOTER, ALERT_TITLE, CHECK_INTERVAL, ERROR_ALERT_THRESHOLD};
use crate::monitor::report::{CycleReport, ExpiringEntry, FailingEntry};
use crate::notify::message::render_report;
use crate::notify::Notifier;
use crate::probe::CertProber;
use crate::Result;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::interval;

/// Main monitoring daemon.
///
/// Probes every configured domain once per cycle, strictly sequentially and in
/// configured order, then dispatches at most one aggregated alert. State lives
/// for the process lifetime and is mutated only by the cycle itself.
pub struct MonitorDaemon {
    domains: Vec<String>,
    threshold: Duration,
    prober: Arc<dyn CertProber>,
    notifier: Arc<dyn Notifier>,
    // domain -> remaining lifetime as of the last successful probe
    will_expire_soon: HashMap<String, Duration>,
    // domain -> consecutive failed probes; reset to 0 on success, not removed
    error_counts: HashMap<String, u32>,
    shutdown_tx: Arc<watch::Sender<bool>>,
    shutdown_rx: watch::Receiver<bool>,
}

/// Cancellation trigger for a running daemon. Safe to invoke more than once;
/// the first call wins.
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    /// Request shutdown. The daemon observes this at its next suspension
    /// point: mid-probe, mid-dispatch or during the inter-cycle wait.
    pub fn stop(&self) {
        let _ = self.tx.send(true);
    }
}

/// How a single cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// All domains were processed and any warranted alert was dispatched
    Completed,
    /// Shutdown was requested mid-cycle; remaining work was abandoned and no
    /// alert was sent
    Aborted,
}

impl MonitorDaemon {
    /// Create a daemon from validated configuration and its collaborators
    pub fn new(config: &Config, prober: Arc<dyn CertProber>, notifier: Arc<dyn Notifier>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            domains: config.domains.clone(),
            threshold: config.before_expired,
            prober,
            notifier,
            will_expire_soon: HashMap::new(),
            error_counts: HashMap::new(),
            shutdown_tx: Arc::new(shutdown_tx),
            shutdown_rx,
        }
    }

    /// Get a handle that cancels `start()` from another task
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: Arc::clone(&self.shutdown_tx),
        }
    }

    /// Run the check loop: one cycle immediately, then one every 12 hours,
    /// until the shutdown handle fires.
    pub async fn start(&mut self) -> Result<()> {
        tracing::info!(domains = self.domains.len(), "Started");

        let mut ticker = interval(CHECK_INTERVAL);

        loop {
            // First tick completes immediately
            tokio::select! {
                _ = ticker.tick() => {}
                _ = self.shutdown_rx.changed() => break,
            }

            if self.run_cycle().await == CycleOutcome::Aborted {
                break;
            }
        }

        tracing::info!("Stopped");
        Ok(())
    }

    /// Run a single check cycle over all configured domains
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        tracing::debug!("Check once");

        for domain in &self.domains {
            if *self.shutdown_rx.borrow() {
                return CycleOutcome::Aborted;
            }

            let probed = tokio::select! {
                result = self.prober.probe(domain) => result,
                _ = self.shutdown_rx.changed() => return CycleOutcome::Aborted,
            };

            match probed {
                Err(error) => {
                    tracing::error!(domain = %domain, error = %error, "Certificate probe failed");
                    *self.error_counts.entry(domain.clone()).or_insert(0) += 1;
                }
                Ok(expires_at) => {
                    self.error_counts.insert(domain.clone(), 0);

                    let remaining = expires_at - Utc::now();
                    let days = remaining.num_hours() / 24;

                    if remaining > self.threshold {
                        // Healthy, clear any stale near-expiry entry
                        tracing::debug!(domain = %domain, days, "Expiration");
                        self.will_expire_soon.remove(domain);
                    } else {
                        tracing::info!(domain = %domain, days, "Expiration");
                        self.will_expire_soon.insert(domain.clone(), remaining);
                    }
                }
            }
        }

        if *self.shutdown_rx.borrow() {
            return CycleOutcome::Aborted;
        }

        let report = self.current_report();
        if report.is_empty() {
            return CycleOutcome::Completed;
        }

        let content = render_report(&report);
        let dispatch = self.notifier.send_alert(ALERT_TITLE, &content, ALERT_FOOTER);

        tokio::select! {
            result = dispatch => {
                if let Err(error) = result {
                    tracing::error!(error = %error, "Send message");
                }
            }
            _ = self.shutdown_rx.changed() => return CycleOutcome::Aborted,
        }

        CycleOutcome::Completed
    }

    /// Build the cycle outcome from the current state maps, in configured
    /// domain order
    pub fn current_report(&self) -> CycleReport {
        let mut report = CycleReport::default();

        for domain in &self.domains {
            if let Some(remaining) = self.will_expire_soon.get(domain) {
                report.expiring.push(ExpiringEntry {
                    domain: domain.clone(),
                    remaining: *remaining,
                });
            }
        }

        for domain in &self.domains {
            if let Some(&count) = self.error_counts.get(domain) {
                if count >= ERROR_ALERT_THRESHOLD {
                    report.failing.push(FailingEntry {
                        domain: domain.clone(),
                        count,
                    });
                }
            }
        }

        report
    }
}
