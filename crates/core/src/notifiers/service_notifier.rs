use async_trait::async_trait;
use log::debug;
use pricewatch_notify::{Notification, NotifyError};
use std::time::Duration;

use crate::agent::Notifier;
use crate::alerts::AlertMessage;
use crate::errors::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Posts alerts to the quote service's `/api/send-alert` endpoint.
pub struct ServiceNotifier {
    client: reqwest::Client,
    alert_url: String,
}

impl ServiceNotifier {
    pub fn new(service_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            alert_url: format!("{}/api/send-alert", service_url.trim_end_matches('/')),
        }
    }

    pub fn alert_url(&self) -> &str {
        &self.alert_url
    }
}

#[async_trait]
impl Notifier for ServiceNotifier {
    async fn send(&self, key: &str, message: &AlertMessage) -> Result<()> {
        let payload = Notification::new(key, message.title.as_str(), message.content.as_str());
        debug!("Posting alert to {}", self.alert_url);

        let response = self.client.post(&self.alert_url).json(&payload).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(Error::Notify(NotifyError::Gateway(format!(
                "Alert endpoint returned {}: {}",
                status, body
            ))));
        }
        debug!("Alert accepted: {}", body);
        Ok(())
    }
}
