//! Synthetic sample generation.
//!
//! Used by the standalone display agent and as the quote service fallback.
//! The walk is deliberately naive: a uniform step in [-1, 1) around the
//! baseline, with no volatility control.

use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;

use crate::models::{Sample, SampleOrigin};

/// Lower bound of the baseline used when no previous price is known.
pub const SEED_PRICE_MIN: f64 = 400.0;
/// Upper bound (exclusive) of the seeded baseline.
pub const SEED_PRICE_MAX: f64 = 410.0;
/// Half width of the per-sample step.
pub const MAX_STEP: f64 = 1.0;

#[derive(Clone, Copy, Debug, Default)]
pub struct SyntheticGenerator;

impl SyntheticGenerator {
    /// Generate a sample around `baseline`.
    ///
    /// A missing or zero baseline is replaced by a random price in
    /// [`SEED_PRICE_MIN`], [`SEED_PRICE_MAX`].
    pub fn generate<R: Rng + ?Sized>(&self, baseline: Option<Decimal>, rng: &mut R) -> Sample {
        let baseline = baseline
            .filter(|price| !price.is_zero())
            .unwrap_or_else(|| to_decimal(rng.gen_range(SEED_PRICE_MIN..SEED_PRICE_MAX)));
        let delta = to_decimal(rng.gen_range(-MAX_STEP..MAX_STEP));

        Sample {
            price: baseline + delta,
            change: delta,
            change_percent: delta / baseline * Decimal::ONE_HUNDRED,
            timestamp: Utc::now(),
            origin: SampleOrigin::Synthetic,
        }
    }

    /// Generate with the thread-local RNG.
    pub fn generate_now(&self, baseline: Option<Decimal>) -> Sample {
        self.generate(baseline, &mut rand::thread_rng())
    }
}

fn to_decimal(value: f64) -> Decimal {
    // Values come from bounded ranges, so the conversion cannot overflow.
    Decimal::try_from(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;

    #[test]
    fn test_seeded_baseline_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let sample = SyntheticGenerator.generate(None, &mut rng);
            let baseline = sample.price - sample.change;
            assert!(baseline >= dec!(400) && baseline < dec!(410), "{}", baseline);
            assert!(sample.change >= dec!(-1) && sample.change < dec!(1));
        }
    }

    #[test]
    fn test_walks_from_baseline() {
        let mut rng = StdRng::seed_from_u64(42);
        let baseline = dec!(402.50);
        for _ in 0..500 {
            let sample = SyntheticGenerator.generate(Some(baseline), &mut rng);
            assert_eq!(sample.price - sample.change, baseline);
            assert!(sample.price >= baseline - dec!(1) && sample.price < baseline + dec!(1));
        }
    }

    #[test]
    fn test_change_percent_relative_to_baseline() {
        let mut rng = StdRng::seed_from_u64(3);
        let sample = SyntheticGenerator.generate(Some(dec!(400)), &mut rng);
        let expected = sample.change / dec!(400) * dec!(100);
        assert_eq!(sample.change_percent, expected);
        assert_eq!(sample.origin, SampleOrigin::Synthetic);
    }

    #[test]
    fn test_zero_baseline_is_reseeded() {
        let mut rng = StdRng::seed_from_u64(11);
        let sample = SyntheticGenerator.generate(Some(Decimal::ZERO), &mut rng);
        assert!(sample.price > dec!(398));
    }
}
