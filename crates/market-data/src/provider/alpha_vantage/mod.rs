//! Alpha Vantage quote provider implementation.
//!
//! Uses the TIME_SERIES_INTRADAY endpoint at 1-minute granularity and reports
//! the close of the most recent bar.
//!
//! Note: Alpha Vantage free tier is limited to 5 API calls per minute.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use log::{debug, warn};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::Sample;
use crate::provider::QuoteProvider;

pub const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER_ID: &str = "ALPHA_VANTAGE";
const INTERVAL: &str = "1min";
const SERIES_KEY: &str = "Time Series (1min)";
/// Exchange zone assumed when the response does not name one.
const DEFAULT_TIME_ZONE: Tz = chrono_tz::America::New_York;

/// Alpha Vantage intraday provider.
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

// ============================================================================
// Response structures for Alpha Vantage API
// ============================================================================

/// TIME_SERIES_INTRADAY response. Keys of the series are
/// `YYYY-MM-DD HH:MM:SS` in the exchange zone named by the metadata, so
/// ordering them as strings orders them in time.
#[derive(Debug, Deserialize)]
struct IntradayResponse {
    #[serde(rename = "Meta Data")]
    meta: Option<IntradayMeta>,
    #[serde(rename = "Time Series (1min)")]
    time_series: Option<BTreeMap<String, IntradayBar>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IntradayMeta {
    #[serde(rename = "6. Time Zone")]
    time_zone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IntradayBar {
    #[serde(rename = "4. close")]
    close: String,
}

// ============================================================================
// AlphaVantageProvider implementation
// ============================================================================

impl AlphaVantageProvider {
    /// Create a new Alpha Vantage provider with the given API key.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL.to_string())
    }

    /// Create a provider that talks to a different query endpoint.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Make a request to the Alpha Vantage API.
    async fn fetch(&self, params: &[(&str, &str)]) -> Result<String, MarketDataError> {
        let mut all_params: Vec<(&str, &str)> = params.to_vec();
        all_params.push(("apikey", &self.api_key));

        let url = reqwest::Url::parse_with_params(&self.base_url, &all_params).map_err(|e| {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to build URL: {}", e),
            }
        })?;

        debug!(
            "Alpha Vantage request: {}",
            url.as_str().replace(&self.api_key, "***")
        );

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::Network(e)
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        Ok(response.text().await?)
    }

    /// Check for API-level errors in the response.
    fn check_api_error(
        error_message: &Option<String>,
        note: &Option<String>,
        information: &Option<String>,
    ) -> Result<(), MarketDataError> {
        if let Some(ref msg) = error_message {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: msg.clone(),
            });
        }

        // "Note" and "Information" usually indicate rate limiting
        for msg in [note, information].into_iter().flatten() {
            if msg.contains("API call frequency") || msg.contains("rate limit") {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            warn!("Alpha Vantage notice: {}", msg);
        }

        Ok(())
    }

    /// Resolve the exchange zone of a response, e.g. `US/Eastern`.
    fn time_zone(meta: Option<&IntradayMeta>) -> Tz {
        match meta.and_then(|m| m.time_zone.as_deref()) {
            Some(name) => name.trim().parse::<Tz>().unwrap_or_else(|_| {
                warn!(
                    "Unknown Alpha Vantage time zone '{}', assuming {}",
                    name, DEFAULT_TIME_ZONE
                );
                DEFAULT_TIME_ZONE
            }),
            None => DEFAULT_TIME_ZONE,
        }
    }

    /// Parse an intraday timestamp (`YYYY-MM-DD HH:MM:SS`) given in `tz`.
    /// Ambiguous wall-clock times resolve to the earlier instant.
    fn parse_timestamp(s: &str, tz: Tz) -> Option<DateTime<Utc>> {
        let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok()?;
        tz.from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }

    fn parse_error(message: impl Into<String>) -> MarketDataError {
        MarketDataError::ProviderParse {
            provider: PROVIDER_ID.to_string(),
            message: message.into(),
        }
    }

    /// Turn an intraday response body into a sample of its most recent bar.
    fn parse_intraday(text: &str) -> Result<Sample, MarketDataError> {
        let response: IntradayResponse = serde_json::from_str(text)
            .map_err(|e| Self::parse_error(format!("Failed to parse response: {}", e)))?;

        Self::check_api_error(
            &response.error_message,
            &response.note,
            &response.information,
        )?;

        let time_series = response
            .time_series
            .ok_or_else(|| Self::parse_error(format!("missing '{}'", SERIES_KEY)))?;

        let (latest_time, latest_bar) = time_series
            .iter()
            .next_back()
            .ok_or_else(|| Self::parse_error("empty time series"))?;

        let tz = Self::time_zone(response.meta.as_ref());
        let timestamp = Self::parse_timestamp(latest_time, tz)
            .ok_or_else(|| Self::parse_error(format!("invalid timestamp '{}'", latest_time)))?;
        let price = Decimal::from_str(latest_bar.close.trim())
            .map_err(|_| Self::parse_error(format!("invalid close '{}'", latest_bar.close)))?;

        Ok(Sample::from_provider(price, timestamp))
    }
}

#[async_trait]
impl QuoteProvider for AlphaVantageProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<Sample, MarketDataError> {
        let params = [
            ("function", "TIME_SERIES_INTRADAY"),
            ("symbol", symbol),
            ("interval", INTERVAL),
        ];

        let text = self.fetch(&params).await?;
        let sample = Self::parse_intraday(&text)?;

        debug!(
            "Alpha Vantage: {} latest close {} at {}",
            symbol, sample.price, sample.timestamp
        );

        Ok(sample)
    }
}
