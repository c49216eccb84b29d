use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{DEFAULT_ALERT_THRESHOLD_PERCENT, DEFAULT_POLL_INTERVAL_SECS};

/// Effective user settings of the display agent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Alert when |change percent| reaches this value. Always > 0.
    pub alert_threshold_percent: Decimal,
    /// Push gateway key; empty disables notifications.
    pub notification_key: String,
    /// Poll interval in milliseconds. Always > 0.
    pub poll_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            alert_threshold_percent: DEFAULT_ALERT_THRESHOLD_PERCENT,
            notification_key: String::new(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_SECS * 1000,
        }
    }
}

impl Settings {
    pub fn notifications_enabled(&self) -> bool {
        !self.notification_key.is_empty()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Raw settings as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsForm {
    pub threshold: String,
    pub notification_key: String,
    pub interval_seconds: String,
}

impl SettingsForm {
    pub fn new(
        threshold: impl Into<String>,
        notification_key: impl Into<String>,
        interval_seconds: impl Into<String>,
    ) -> Self {
        Self {
            threshold: threshold.into(),
            notification_key: notification_key.into(),
            interval_seconds: interval_seconds.into(),
        }
    }

    /// Resolve the form into settings. Invalid or non-positive numbers fall
    /// back to the defaults; the key is taken literally.
    pub fn parse(&self) -> Settings {
        let alert_threshold_percent =
            parse_positive_decimal(&self.threshold).unwrap_or(DEFAULT_ALERT_THRESHOLD_PERCENT);
        let interval_secs =
            parse_whole_number(&self.interval_seconds).unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

        Settings {
            alert_threshold_percent,
            notification_key: self.notification_key.clone(),
            poll_interval_ms: interval_secs.saturating_mul(1000),
        }
    }
}

impl From<&Settings> for SettingsForm {
    fn from(settings: &Settings) -> Self {
        Self {
            threshold: settings.alert_threshold_percent.normalize().to_string(),
            notification_key: settings.notification_key.clone(),
            interval_seconds: (settings.poll_interval_ms / 1000).to_string(),
        }
    }
}

/// A strictly positive decimal, or `None`.
pub(crate) fn parse_positive_decimal(input: &str) -> Option<Decimal> {
    Decimal::from_str(input.trim())
        .ok()
        .filter(|value| *value > Decimal::ZERO)
}

/// A strictly positive whole number. Fractions are truncated (`"30.9"` is 30).
pub(crate) fn parse_whole_number(input: &str) -> Option<u64> {
    let trimmed = input.trim();
    trimmed
        .parse::<u64>()
        .ok()
        .or_else(|| Decimal::from_str(trimmed).ok()?.trunc().to_u64())
        .filter(|value| *value > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.alert_threshold_percent, dec!(1));
        assert_eq!(settings.notification_key, "");
        assert_eq!(settings.poll_interval_ms, 60_000);
        assert!(!settings.notifications_enabled());
    }

    #[test]
    fn test_form_parses_values() {
        let settings = SettingsForm::new("2.5", "abc", "30").parse();
        assert_eq!(settings.alert_threshold_percent, dec!(2.5));
        assert_eq!(settings.notification_key, "abc");
        assert_eq!(settings.poll_interval_ms, 30_000);
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let settings = SettingsForm::new("abc", "", "soon").parse();
        assert_eq!(settings.alert_threshold_percent, dec!(1));
        assert_eq!(settings.poll_interval_ms, 60_000);

        let settings = SettingsForm::new("0", "", "0").parse();
        assert_eq!(settings.alert_threshold_percent, dec!(1));
        assert_eq!(settings.poll_interval_ms, 60_000);

        let settings = SettingsForm::new("-2", "", "-5").parse();
        assert_eq!(settings.alert_threshold_percent, dec!(1));
        assert_eq!(settings.poll_interval_ms, 60_000);
    }

    #[test]
    fn test_fractional_interval_is_truncated() {
        let settings = SettingsForm::new("1", "", " 30.9 ").parse();
        assert_eq!(settings.poll_interval_ms, 30_000);
    }

    #[test]
    fn test_key_is_literal() {
        let settings = SettingsForm::new("1", "  SCT key ", "60").parse();
        assert_eq!(settings.notification_key, "  SCT key ");
    }

    #[test]
    fn test_form_prefill_from_settings() {
        let settings = Settings {
            alert_threshold_percent: dec!(2.50),
            notification_key: "abc".to_string(),
            poll_interval_ms: 30_000,
        };
        let form = SettingsForm::from(&settings);
        assert_eq!(form, SettingsForm::new("2.5", "abc", "30"));
        assert_eq!(form.parse(), settings);
    }
}
