// Alert message rendering
//
// The only place alert text is formatted; the check loop hands over a
// structured CycleReport and stays free of presentation concerns.

use crate::monitor::report::CycleReport;

/// Render a cycle report into the alert body. An empty report renders to an
/// empty string, which callers treat as "nothing to send".
pub fn render_report(report: &CycleReport) -> String {
    let mut message = String::new();

    if !report.expiring.is_empty() {
        message.push_str("HTTPS Certification will expire soon:<br>");
        for entry in &report.expiring {
            message.push_str(&format!(
                "- {} (remaining: {}d)<br>",
                entry.domain,
                entry.remaining_days()
            ));
        }
    }

    if !report.failing.is_empty() {
        message.push_str("HTTPS Certification check failed:<br>");
        for entry in &report.failing {
            message.push_str(&format!(
                "- {} (errorCount: {})<br>",
                entry.domain, entry.count
            ));
        }
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::report::{ExpiringEntry, FailingEntry};
    use chrono::Duration;

    #[test]
    fn test_empty_report_renders_empty() {
        assert_eq!(render_report(&CycleReport::default()), "");
    }

    #[test]
    fn test_expiry_section_only() {
        let report = CycleReport {
            expiring: vec![ExpiringEntry {
                domain: "a.example".to_string(),
                remaining: Duration::days(5) + Duration::hours(1),
            }],
            failing: Vec::new(),
        };

        assert_eq!(
            render_report(&report),
            "HTTPS Certification will expire soon:<br>- a.example (remaining: 5d)<br>"
        );
    }

    #[test]
    fn test_failure_section_only() {
        let report = CycleReport {
            expiring: Vec::new(),
            failing: vec![FailingEntry {
                domain: "b.example".to_string(),
                count: 6,
            }],
        };

        assert_eq!(
            render_report(&report),
            "HTTPS Certification check failed:<br>- b.example (errorCount: 6)<br>"
        );
    }

    #[test]
    fn test_expiry_section_precedes_failure_section() {
        let report = CycleReport {
            expiring: vec![ExpiringEntry {
                domain: "a.example".to_string(),
                remaining: Duration::days(2),
            }],
            failing: vec![FailingEntry {
                domain: "b.example".to_string(),
                count: 7,
            }],
        };

        let rendered = render_report(&report);
        let expire_at = rendered.find("will expire soon").unwrap();
        let failed_at = rendered.find("check failed").unwrap();
        assert!(expire_at < failed_at);
        assert!(rendered.contains("- a.example (remaining: 2d)<br>"));
        assert!(rendered.contains("- b.example (errorCount: 7)<br>"));
    }

    #[test]
    fn test_expired_certificate_shows_negative_days() {
        let report = CycleReport {
            expiring: vec![ExpiringEntry {
                domain: "late.example".to_string(),
                remaining: Duration::days(-1) - Duration::hours(1),
            }],
            failing: Vec::new(),
        };

        assert!(render_report(&report).contains("(remaining: -1d)"));
    }
}
