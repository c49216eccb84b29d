//! Quote provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::Sample;

/// Trait for quote providers.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use pricewatch_market_data::{MarketDataError, QuoteProvider, Sample};
///
/// struct FixedProvider;
///
/// #[async_trait]
/// impl QuoteProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn get_latest_quote(&self, _symbol: &str) -> Result<Sample, MarketDataError> {
///         Ok(Sample::from_provider(rust_decimal::Decimal::ONE_HUNDRED, chrono::Utc::now()))
///     }
/// }
/// ```
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch the most recent quote for `symbol`.
    ///
    /// Returned samples carry [`SampleOrigin::Provider`](crate::SampleOrigin::Provider).
    async fn get_latest_quote(&self, symbol: &str) -> Result<Sample, MarketDataError>;
}
