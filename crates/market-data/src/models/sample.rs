use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where a sample came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleOrigin {
    /// Real data returned by the quote provider
    #[default]
    Provider,
    /// Generated because the provider call failed
    Fallback,
    /// Generated on purpose (standalone mode, or no provider configured)
    Synthetic,
}

impl SampleOrigin {
    /// True for samples that were not observed on a real market.
    pub fn is_generated(&self) -> bool {
        !matches!(self, SampleOrigin::Provider)
    }
}

/// One price observation with its change from the previous sample.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    /// Current price
    pub price: Decimal,

    /// Absolute delta from the previous sample
    pub change: Decimal,

    /// Delta as a percentage of the previous price
    pub change_percent: Decimal,

    /// Time of the observation
    pub timestamp: DateTime<Utc>,

    /// Real, fallback or synthetic
    #[serde(default)]
    pub origin: SampleOrigin,
}

impl Sample {
    /// Sample from the provider. The provider only reports a price, so the
    /// change fields are zero.
    pub fn from_provider(price: Decimal, timestamp: DateTime<Utc>) -> Self {
        Self {
            price,
            change: Decimal::ZERO,
            change_percent: Decimal::ZERO,
            timestamp,
            origin: SampleOrigin::Provider,
        }
    }

    pub fn with_origin(mut self, origin: SampleOrigin) -> Self {
        self.origin = origin;
        self
    }
}
