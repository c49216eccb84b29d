use async_trait::async_trait;
use log::info;

use crate::agent::Notifier;
use crate::alerts::AlertMessage;
use crate::errors::Result;

/// Standalone notifier: logs the push instead of sending it.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, _key: &str, message: &AlertMessage) -> Result<()> {
        info!("Push notification: {} | {}", message.title, message.content);
        Ok(())
    }
}
