//! Error types for the market data crate.
//!
//! None of these errors are retried. The [`QuoteService`](crate::QuoteService)
//! decides, through its fallback policy, whether a failure reaches the caller.

use thiserror::Error;

/// Errors that can occur while fetching a quote.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider could not be reached or the connection broke mid-request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered, but not with the payload shape we expect
    /// (for example the time series key is missing).
    #[error("Failed to parse {provider} response: {message}")]
    ProviderParse {
        /// The provider that returned the payload
        provider: String,
        /// What was wrong with it
        message: String,
    },

    /// The provider reported an API-level error.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider throttled the request (HTTP 429 or a frequency notice).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// No provider is configured and the fallback policy forbids synthetic data.
    #[error("No quote provider configured")]
    NoProvider,
}

impl MarketDataError {
    /// Returns true when the failure came from parsing the provider payload
    /// rather than from transport or the provider itself.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ProviderParse { .. })
    }
}
