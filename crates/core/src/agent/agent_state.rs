use chrono::{DateTime, Local};
use pricewatch_market_data::SampleOrigin;
use rust_decimal::Decimal;

use crate::chart::ChartBuffer;
use crate::settings::Settings;

/// Latest and prior price seen by the agent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunningPriceState {
    pub current_price: Option<Decimal>,
    pub previous_price: Option<Decimal>,
}

impl RunningPriceState {
    /// Shift the current price into `previous_price` and store `price`.
    pub fn record(&mut self, price: Decimal) {
        self.previous_price = self.current_price;
        self.current_price = Some(price);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    #[default]
    Disconnected,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Connected => "Connected",
            ConnectionState::Disconnected => "Disconnected",
        }
    }
}

/// Styling of the change fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Trend {
    #[default]
    Positive,
    Negative,
}

impl Trend {
    /// Non-negative changes are positive.
    pub fn of(change: Decimal) -> Self {
        if change.is_sign_negative() && !change.is_zero() {
            Trend::Negative
        } else {
            Trend::Positive
        }
    }
}

/// What the price panel currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub price: Option<Decimal>,
    pub change: Decimal,
    pub change_percent: Decimal,
    pub trend: Trend,
    pub origin: Option<SampleOrigin>,
    pub last_updated: Option<DateTime<Local>>,
    pub alert_visible: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PollStats {
    pub polls: u64,
    pub failed_polls: u64,
    pub alerts_triggered: u64,
    pub notifications_sent: u64,
}

/// Owned copy of everything the dashboard renders.
#[derive(Clone, Debug)]
pub struct AgentSnapshot {
    pub symbol: String,
    pub connection: ConnectionState,
    pub prices: RunningPriceState,
    pub display: DisplayState,
    pub chart: ChartBuffer,
    pub settings: Settings,
    pub stats: PollStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_record_shifts_prices() {
        let mut prices = RunningPriceState::default();
        prices.record(dec!(401));
        assert_eq!(prices.current_price, Some(dec!(401)));
        assert_eq!(prices.previous_price, None);

        prices.record(dec!(402.5));
        assert_eq!(prices.current_price, Some(dec!(402.5)));
        assert_eq!(prices.previous_price, Some(dec!(401)));
    }

    #[test]
    fn test_trend_of_change() {
        assert_eq!(Trend::of(dec!(0.01)), Trend::Positive);
        assert_eq!(Trend::of(Decimal::ZERO), Trend::Positive);
        assert_eq!(Trend::of(dec!(-0.0)), Trend::Positive);
        assert_eq!(Trend::of(dec!(-0.01)), Trend::Negative);
    }

    #[test]
    fn test_starts_disconnected() {
        assert_eq!(ConnectionState::default(), ConnectionState::Disconnected);
        assert!(!ConnectionState::default().is_connected());
        assert_eq!(ConnectionState::Connected.label(), "Connected");
    }
}
