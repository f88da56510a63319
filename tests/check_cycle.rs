// Check cycle behavior against fake collaborators

use async_trait::async_trait;
use cert_sentry::config::Config;
use cert_sentry::error::ProbeError;
use cert_sentry::monitor::{CycleOutcome, MonitorDaemon, ShutdownHandle};
use cert_sentry::notify::Notifier;
use cert_sentry::probe::CertProber;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use url::Url;

fn config_for(domains: &[&str]) -> Config {
    Config {
        domains: domains.iter().map(|d| d.to_string()).collect(),
        before_expired: Duration::days(7),
        notify_url: Url::parse("https://open.feishu.cn/open-apis/bot/v2/hook/abc").unwrap(),
    }
}

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_alert(&self, title: &str, content: &str, footer: &str) -> anyhow::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((title.to_string(), content.to_string(), footer.to_string()));
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "recording"
    }
}

/// Prober returning a fixed remaining lifetime per domain; `None` fails
struct FixedProber {
    lifetimes: HashMap<String, Option<Duration>>,
}

impl FixedProber {
    fn new(lifetimes: &[(&str, Option<Duration>)]) -> Self {
        Self {
            lifetimes: lifetimes
                .iter()
                .map(|(domain, lifetime)| (domain.to_string(), *lifetime))
                .collect(),
        }
    }
}

#[async_trait]
impl CertProber for FixedProber {
    async fn probe(&self, domain: &str) -> Result<DateTime<Utc>, ProbeError> {
        match self.lifetimes.get(domain).copied().flatten() {
            Some(lifetime) => Ok(Utc::now() + lifetime),
            None => Err(ProbeError::NoCertificate {
                domain: domain.to_string(),
            }),
        }
    }
}

/// Prober that requests shutdown while probing one specific domain, then
/// never completes, so cancellation has to come from the select race
struct StoppingProber {
    stop_on: String,
    handle: Mutex<Option<ShutdownHandle>>,
    probed: Mutex<Vec<String>>,
}

#[async_trait]
impl CertProber for StoppingProber {
    async fn probe(&self, domain: &str) -> Result<DateTime<Utc>, ProbeError> {
        self.probed.lock().unwrap().push(domain.to_string());

        if domain == self.stop_on {
            let handle = self.handle.lock().unwrap().take();
            if let Some(handle) = handle {
                handle.stop();
            }
            std::future::pending::<()>().await;
        }

        // Near expiry, so an aborted cycle has pending alert material
        Ok(Utc::now() + Duration::days(2))
    }
}

#[tokio::test]
async fn two_domain_scenario_alerts_on_expiry_only() {
    // a.example expires in ~5 days, b.example fails once: the alert carries
    // the remaining-days line and no failure section (1 < 5)
    let prober = FixedProber::new(&[
        ("a.example", Some(Duration::days(5) + Duration::hours(1))),
        ("b.example", None),
    ]);
    let notifier = Arc::new(RecordingNotifier::default());
    let mut daemon = MonitorDaemon::new(
        &config_for(&["a.example", "b.example"]),
        Arc::new(prober),
        notifier.clone(),
    );

    let outcome = daemon.run_cycle().await;
    assert_eq!(outcome, CycleOutcome::Completed);

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);

    let (title, content, footer) = &sent[0];
    assert_eq!(title, "Certification Error: Fired");
    assert_eq!(footer, "cert-sentry");
    assert_eq!(
        content,
        "HTTPS Certification will expire soon:<br>- a.example (remaining: 5d)<br>"
    );
}

#[tokio::test]
async fn cancellation_mid_cycle_skips_alert_and_remaining_domains() {
    let prober = Arc::new(StoppingProber {
        stop_on: "b.example".to_string(),
        handle: Mutex::new(None),
        probed: Mutex::new(Vec::new()),
    });
    let notifier = Arc::new(RecordingNotifier::default());
    let mut daemon = MonitorDaemon::new(
        &config_for(&["a.example", "b.example", "c.example"]),
        prober.clone(),
        notifier.clone(),
    );
    *prober.handle.lock().unwrap() = Some(daemon.shutdown_handle());

    let outcome = daemon.run_cycle().await;

    assert_eq!(outcome, CycleOutcome::Aborted);
    // a.example was near expiry when the cycle was abandoned, yet nothing
    // was dispatched and c.example was never probed
    assert!(notifier.sent.lock().unwrap().is_empty());
    assert_eq!(
        prober.probed.lock().unwrap().as_slice(),
        ["a.example", "b.example"]
    );
}

#[tokio::test]
async fn start_returns_promptly_after_stop() {
    let prober = FixedProber::new(&[("a.example", Some(Duration::days(90)))]);
    let notifier = Arc::new(RecordingNotifier::default());
    let mut daemon = MonitorDaemon::new(
        &config_for(&["a.example"]),
        Arc::new(prober),
        notifier.clone(),
    );
    let handle = daemon.shutdown_handle();

    let task = tokio::spawn(async move { daemon.start().await });

    // Let the immediate first cycle finish, then stop during the 12h wait
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    handle.stop();
    // stop() is safe to repeat
    handle.stop();

    let result = tokio::time::timeout(std::time::Duration::from_secs(2), task)
        .await
        .expect("start did not return after stop")
        .expect("monitor task panicked");
    assert!(result.is_ok());
    assert!(notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn stop_before_start_prevents_any_cycle() {
    let prober = Arc::new(StoppingProber {
        stop_on: "never".to_string(),
        handle: Mutex::new(None),
        probed: Mutex::new(Vec::new()),
    });
    let notifier = Arc::new(RecordingNotifier::default());
    let mut daemon = MonitorDaemon::new(
        &config_for(&["a.example"]),
        prober.clone(),
        notifier.clone(),
    );

    daemon.shutdown_handle().stop();
    daemon.start().await.unwrap();

    assert!(prober.probed.lock().unwrap().is_empty());
    assert!(notifier.sent.lock().unwrap().is_empty());
}
