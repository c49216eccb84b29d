use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Number of points kept in the chart buffer.
pub const CHART_CAPACITY: usize = 30;

/// Alert threshold (percent) used when none is configured or the input is invalid.
pub const DEFAULT_ALERT_THRESHOLD_PERCENT: Decimal = dec!(1);

/// Poll interval used when none is configured or the input is invalid.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Change percent reported by the test alert.
pub const TEST_ALERT_CHANGE_PERCENT: Decimal = dec!(1.5);

/// Persisted settings keys.
pub const SETTING_ALERT_THRESHOLD: &str = "alertThreshold";
pub const SETTING_NOTIFICATION_KEY: &str = "notificationKey";
pub const SETTING_POLL_INTERVAL_MS: &str = "refreshInterval";

pub const DEFAULT_SYMBOL: &str = "QQQ";
