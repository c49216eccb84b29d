use log::{debug, warn};
use std::sync::Arc;

use super::settings_model::{parse_positive_decimal, parse_whole_number};
use super::{Settings, SettingsForm, SettingsStore};
use crate::constants::{
    SETTING_ALERT_THRESHOLD, SETTING_NOTIFICATION_KEY, SETTING_POLL_INTERVAL_MS,
};
use crate::errors::Result;

/// Loads and saves [`Settings`] through a [`SettingsStore`].
#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Defaults, overwritten by every persisted value that is present and valid.
    pub fn load(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(raw) = self.store.get(SETTING_ALERT_THRESHOLD)? {
            match parse_positive_decimal(&raw) {
                Some(threshold) => settings.alert_threshold_percent = threshold,
                None => warn!("Ignoring persisted alert threshold '{}'", raw),
            }
        }

        if let Some(key) = self.store.get(SETTING_NOTIFICATION_KEY)? {
            settings.notification_key = key;
        }

        if let Some(raw) = self.store.get(SETTING_POLL_INTERVAL_MS)? {
            match parse_whole_number(&raw) {
                Some(ms) => settings.poll_interval_ms = ms,
                None => warn!("Ignoring persisted poll interval '{}'", raw),
            }
        }

        debug!(
            "Loaded settings: threshold {}%, interval {}ms, notifications {}",
            settings.alert_threshold_percent,
            settings.poll_interval_ms,
            if settings.notifications_enabled() {
                "enabled"
            } else {
                "disabled"
            }
        );
        Ok(settings)
    }

    /// Parse the form, persist all three values and return the effective settings.
    pub fn save(&self, form: &SettingsForm) -> Result<Settings> {
        let settings = form.parse();
        self.store.set(
            SETTING_ALERT_THRESHOLD,
            &settings.alert_threshold_percent.to_string(),
        )?;
        self.store
            .set(SETTING_NOTIFICATION_KEY, &settings.notification_key)?;
        self.store.set(
            SETTING_POLL_INTERVAL_MS,
            &settings.poll_interval_ms.to_string(),
        )?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemorySettingsStore;
    use rust_decimal_macros::dec;

    fn service() -> (SettingsService, Arc<MemorySettingsStore>) {
        let store = Arc::new(MemorySettingsStore::new());
        (SettingsService::new(store.clone()), store)
    }

    #[test]
    fn test_load_without_persisted_values_is_default() {
        let (service, _) = service();
        assert_eq!(service.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let (service, store) = service();
        let saved = service
            .save(&SettingsForm::new("2.5", "abc", "30"))
            .unwrap();
        assert_eq!(store.get("refreshInterval").unwrap().as_deref(), Some("30000"));
        assert_eq!(store.get("alertThreshold").unwrap().as_deref(), Some("2.5"));

        let loaded = service.load().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.alert_threshold_percent, dec!(2.5));
        assert_eq!(loaded.notification_key, "abc");
        assert_eq!(loaded.poll_interval_ms, 30_000);
    }

    #[test]
    fn test_invalid_persisted_values_are_ignored() {
        let (service, store) = service();
        store.set("alertThreshold", "NaN").unwrap();
        store.set("refreshInterval", "").unwrap();
        store.set("notificationKey", "key").unwrap();

        let loaded = service.load().unwrap();
        assert_eq!(loaded.alert_threshold_percent, dec!(1));
        assert_eq!(loaded.poll_interval_ms, 60_000);
        assert_eq!(loaded.notification_key, "key");
    }
}
