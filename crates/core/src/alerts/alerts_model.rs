use rust_decimal::Decimal;

use crate::utils::format::{money, percent};

/// Outcome of checking one change percent against the threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlertDecision {
    pub triggered: bool,
    pub magnitude: Decimal,
}

/// Triggered iff |change_percent| >= threshold.
pub fn evaluate(change_percent: Decimal, threshold: Decimal) -> AlertDecision {
    let magnitude = change_percent.abs();
    AlertDecision {
        triggered: magnitude >= threshold,
        magnitude,
    }
}

/// Push notification text for a price move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertMessage {
    pub change_percent: Decimal,
    pub price: Decimal,
    pub title: String,
    pub content: String,
}

impl AlertMessage {
    pub fn new(symbol: &str, change_percent: Decimal, price: Decimal) -> Self {
        let pct = percent(change_percent);
        let price_text = money(price);
        Self {
            change_percent,
            price,
            title: format!("{} moved {} ({})", symbol, pct, price_text),
            content: format!(
                "{} price changed {}, current price {}",
                symbol, pct, price_text
            ),
        }
    }
}
