use async_trait::async_trait;
use pricewatch_market_data::{Sample, SampleOrigin, SyntheticGenerator};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use std::sync::Mutex;

use crate::agent::SampleSource;
use crate::errors::Result;

/// Standalone source: walks from the agent's latest price with no network.
#[derive(Debug, Default)]
pub struct SyntheticSource {
    rng: Option<Mutex<StdRng>>,
}

impl SyntheticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic source for tests and demos.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }
}

#[async_trait]
impl SampleSource for SyntheticSource {
    async fn fetch(&self, baseline: Option<Decimal>) -> Result<Sample> {
        let sample = match &self.rng {
            Some(rng) => {
                let mut rng = rng.lock().unwrap_or_else(|p| p.into_inner());
                SyntheticGenerator.generate(baseline, &mut *rng)
            }
            None => SyntheticGenerator.generate_now(baseline),
        };
        Ok(sample.with_origin(SampleOrigin::Synthetic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_walks_from_baseline() {
        let source = SyntheticSource::seeded(3);
        let sample = source.fetch(Some(dec!(405))).await.unwrap();
        assert_eq!(sample.price - sample.change, dec!(405));
        assert_eq!(sample.origin, SampleOrigin::Synthetic);
    }

    #[tokio::test]
    async fn test_seeded_sources_agree() {
        let a = SyntheticSource::seeded(11).fetch(None).await.unwrap();
        let b = SyntheticSource::seeded(11).fetch(None).await.unwrap();
        assert_eq!(a.price, b.price);
        assert_eq!(a.change, b.change);
    }
}
