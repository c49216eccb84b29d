use async_trait::async_trait;
use log::debug;
use pricewatch_market_data::Sample;
use rust_decimal::Decimal;
use std::time::Duration;

use crate::agent::SampleSource;
use crate::errors::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches samples from the quote service's `/api/quote` endpoint.
pub struct ServiceSource {
    client: reqwest::Client,
    quote_url: String,
}

impl ServiceSource {
    pub fn new(service_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            quote_url: format!("{}/api/quote", service_url.trim_end_matches('/')),
        }
    }

    pub fn quote_url(&self) -> &str {
        &self.quote_url
    }
}

#[async_trait]
impl SampleSource for ServiceSource {
    async fn fetch(&self, _baseline: Option<Decimal>) -> Result<Sample> {
        debug!("Fetching quote from {}", self.quote_url);
        let response = self.client.get(&self.quote_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Source(format!(
                "Quote service returned {}: {}",
                status, body
            )));
        }

        Ok(response.json::<Sample>().await?)
    }
}
