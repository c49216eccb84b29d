//! ServerChan push gateway (WeChat delivery keyed by a per-user SendKey).

use async_trait::async_trait;
use log::{debug, error};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::PushGateway;
use crate::errors::{NotifyError, Result};
use crate::models::{GatewayResponse, ValidNotification};

pub const DEFAULT_SERVER_CHAN_URL: &str = "https://sctapi.ftqq.com/";

pub struct ServerChanGateway {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct SendBody<'a> {
    title: &'a str,
    desp: &'a str,
}

impl ServerChanGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, base_url }
    }

    /// Key-scoped send endpoint: `{base}{key}.send`, with the key encoded as
    /// a single path segment.
    fn send_url(&self, key: &str) -> Result<reqwest::Url> {
        let invalid =
            |reason: String| NotifyError::Gateway(format!("Invalid gateway URL: {}", reason));
        let mut url =
            reqwest::Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid(self.base_url.clone()))?
            .pop_if_empty()
            .push(&format!("{}.send", key));
        Ok(url)
    }
}

impl Default for ServerChanGateway {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_CHAN_URL)
    }
}

#[async_trait]
impl PushGateway for ServerChanGateway {
    async fn send(&self, notification: &ValidNotification) -> Result<GatewayResponse> {
        let url = self.send_url(&notification.key)?;

        debug!("Sending push notification '{}'", notification.title);

        let response = self
            .client
            .post(url)
            .json(&SendBody {
                title: &notification.title,
                desp: &notification.content,
            })
            .send()
            .await
            .map_err(|e| {
                error!("Push gateway unreachable: {}", e);
                NotifyError::Network(e)
            })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| NotifyError::Gateway(format!("Failed to read gateway response: {}", e)))?
            .to_vec();

        debug!("Push gateway answered HTTP {}", status);

        Ok(GatewayResponse {
            status,
            content_type,
            body,
        })
    }
}
