use async_trait::async_trait;
use pricewatch_market_data::Sample;
use rust_decimal::Decimal;

use crate::alerts::AlertMessage;
use crate::errors::Result;

/// Where the agent gets its samples from.
#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Fetch one sample. `baseline` is the latest price the agent has seen;
    /// generating sources walk from it, remote sources ignore it.
    async fn fetch(&self, baseline: Option<Decimal>) -> Result<Sample>;
}

/// Delivers alert messages for a notification key.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, key: &str, message: &AlertMessage) -> Result<()>;
}
