// Notification layer - webhook alerting

pub mod feishu;
pub mod message;

use crate::Result;
use async_trait::async_trait;

pub use feishu::FeishuChannel;

/// Notification channel trait - implement this for custom alert destinations
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send an alert message through this channel. Best effort: callers treat
    /// failures as non-fatal.
    async fn send_alert(&self, title: &str, content: &str, footer: &str) -> Result<()>;

    /// Get the channel name for logging
    fn channel_name(&self) -> &str;

    /// Test the channel connectivity (optional)
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }
}
