//! Display formatting shared by the agent and its notifications.

use chrono::{DateTime, TimeZone, Timelike};
use rust_decimal::{Decimal, RoundingStrategy};

/// Round half away from zero to two decimals.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `value` with exactly two decimals, sign kept.
pub fn fixed2(value: Decimal) -> String {
    format!("{:.2}", round2(value))
}

/// `$401.23`, `$-0.55`
pub fn money(value: Decimal) -> String {
    format!("${}", fixed2(value))
}

/// `1.50%`, `-0.12%`
pub fn percent(value: Decimal) -> String {
    format!("{}%", fixed2(value))
}

/// Chart label: hour unpadded, minutes padded (`9:05`, `14:30`).
pub fn time_label<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    format!("{}:{:02}", at.hour(), at.minute())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn test_fixed2_rounds_half_away_from_zero() {
        assert_eq!(fixed2(dec!(1.5)), "1.50");
        assert_eq!(fixed2(dec!(1.005)), "1.01");
        assert_eq!(fixed2(dec!(-1.005)), "-1.01");
        assert_eq!(fixed2(dec!(401.2349)), "401.23");
    }

    #[test]
    fn test_money_and_percent() {
        assert_eq!(money(dec!(405.1)), "$405.10");
        assert_eq!(money(dec!(-0.554)), "$-0.55");
        assert_eq!(percent(dec!(-0.1234)), "-0.12%");
    }

    #[test]
    fn test_time_label() {
        let morning = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 0).unwrap();
        assert_eq!(time_label(&morning), "9:05");

        let offset = FixedOffset::east_opt(3600).unwrap();
        let afternoon = offset.with_ymd_and_hms(2024, 3, 1, 14, 30, 59).unwrap();
        assert_eq!(time_label(&afternoon), "14:30");
    }
}
