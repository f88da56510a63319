// Feishu Robot Alert Channel - interactive card over a chat webhook

use crate::constants::NOTIFY_TIMEOUT;
use crate::notify::Notifier;
use crate::Result;
use async_trait::async_trait;
use serde_json::json;
use url::Url;

/// Feishu (Lark) robot webhook channel
pub struct FeishuChannel {
    url: Url,
    client: reqwest::Client,
}

impl FeishuChannel {
    /// Create a channel posting to the given robot webhook URL
    pub fn new(url: Url) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(NOTIFY_TIMEOUT).build()?;
        Ok(Self { url, client })
    }

    /// Build an interactive card payload. `header_template` selects the card
    /// color: "red" for warnings, "blue" for informational messages.
    fn card(
        &self,
        header_template: &str,
        title: &str,
        content: &str,
        footer: &str,
    ) -> serde_json::Value {
        json!({
            "msg_type": "interactive",
            "card": {
                "config": { "wide_screen_mode": true },
                "header": {
                    "title": { "tag": "plain_text", "content": title },
                    "template": header_template
                },
                "elements": [
                    { "tag": "div", "text": { "tag": "lark_md", "content": content } },
                    { "tag": "hr" },
                    { "tag": "note", "elements": [
                        { "tag": "plain_text", "content": footer }
                    ] }
                ]
            }
        })
    }

    async fn post(&self, payload: &serde_json::Value) -> Result<()> {
        tracing::debug!(body = %payload, "sendMessage");

        let response = self.client.post(self.url.clone()).json(payload).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("{}: {}", status.as_u16(), body));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for FeishuChannel {
    async fn send_alert(&self, title: &str, content: &str, footer: &str) -> Result<()> {
        self.post(&self.card("red", title, content, footer)).await
    }

    fn channel_name(&self) -> &str {
        "feishu"
    }

    async fn test_connection(&self) -> Result<()> {
        let card = self.card(
            "blue",
            "cert-sentry: Test",
            "Test message from cert-sentry<br>",
            "cert-sentry",
        );
        self.post(&card).await
    }
}
