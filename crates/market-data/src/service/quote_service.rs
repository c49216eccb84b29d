use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::{Arc, RwLock};

use super::FallbackPolicy;
use crate::errors::MarketDataError;
use crate::models::{Sample, SampleOrigin};
use crate::provider::QuoteProvider;
use crate::synthetic::SyntheticGenerator;

/// Serves the current quote for one instrument.
///
/// The last known price (real or generated) is the baseline for the next
/// synthetic sample. It is only touched outside of any await point, so a
/// plain lock is enough on a multi-threaded runtime.
pub struct QuoteService {
    provider: Option<Arc<dyn QuoteProvider>>,
    symbol: String,
    policy: FallbackPolicy,
    generator: SyntheticGenerator,
    last_known_price: RwLock<Option<Decimal>>,
}

impl QuoteService {
    /// Create a service. Without a provider every quote is synthetic
    /// (or an error, if the policy is [`FallbackPolicy::Disabled`]).
    pub fn new(
        provider: Option<Arc<dyn QuoteProvider>>,
        symbol: impl Into<String>,
        policy: FallbackPolicy,
    ) -> Self {
        Self {
            provider,
            symbol: symbol.into(),
            policy,
            generator: SyntheticGenerator,
            last_known_price: RwLock::new(None),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn last_known_price(&self) -> Option<Decimal> {
        *self
            .last_known_price
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record_price(&self, price: Decimal) {
        let mut guard = self
            .last_known_price
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(price);
    }

    /// Fetch the current quote, applying the fallback policy on failure.
    pub async fn get_current_quote(&self) -> Result<Sample, MarketDataError> {
        let result = match &self.provider {
            Some(provider) => provider.get_latest_quote(&self.symbol).await,
            None => Err(MarketDataError::NoProvider),
        };

        match result {
            Ok(sample) => {
                self.record_price(sample.price);
                Ok(sample)
            }
            Err(err) => match self.policy {
                FallbackPolicy::Disabled => {
                    warn!("Quote for {} failed, fallback disabled: {}", self.symbol, err);
                    Err(err)
                }
                FallbackPolicy::Synthetic => {
                    let origin = if self.provider.is_some() {
                        warn!(
                            "Quote for {} failed, serving fallback data: {}",
                            self.symbol, err
                        );
                        SampleOrigin::Fallback
                    } else {
                        debug!("No provider configured, serving synthetic quote");
                        SampleOrigin::Synthetic
                    };
                    let sample = self
                        .generator
                        .generate_now(self.last_known_price())
                        .with_origin(origin);
                    self.record_price(sample.price);
                    Ok(sample)
                }
            },
        }
    }
}
