use chrono::Local;
use log::{debug, info, warn};
use pricewatch_market_data::Sample;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::agent_state::{
    AgentSnapshot, ConnectionState, DisplayState, PollStats, RunningPriceState, Trend,
};
use super::agent_traits::{Notifier, SampleSource};
use crate::alerts::{evaluate, AlertMessage};
use crate::chart::ChartBuffer;
use crate::constants::TEST_ALERT_CHANGE_PERCENT;
use crate::errors::{Error, Result};
use crate::settings::{Settings, SettingsForm, SettingsService, SettingsStore};
use crate::utils::format::time_label;

/// Result of one poll cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    Updated {
        alert_triggered: bool,
        notification_sent: bool,
    },
    Disconnected,
}

/// What a poll needs once the agent is unlocked.
struct PollRequest {
    source: Arc<dyn SampleSource>,
    baseline: Option<Decimal>,
}

impl PollRequest {
    async fn fetch(&self) -> Result<Sample> {
        self.source.fetch(self.baseline).await
    }
}

struct PendingAlert {
    notifier: Arc<dyn Notifier>,
    key: String,
    message: AlertMessage,
}

impl PendingAlert {
    async fn send(&self) -> Result<()> {
        self.notifier.send(&self.key, &self.message).await
    }
}

/// Polls a [`SampleSource`], keeps the display state and chart, and notifies
/// when a move crosses the alert threshold.
pub struct DisplayAgent {
    symbol: String,
    source: Arc<dyn SampleSource>,
    notifier: Arc<dyn Notifier>,
    settings_service: SettingsService,
    settings: Settings,
    prices: RunningPriceState,
    connection: ConnectionState,
    display: DisplayState,
    chart: ChartBuffer,
    stats: PollStats,
}

impl DisplayAgent {
    pub fn new(
        symbol: impl Into<String>,
        source: Arc<dyn SampleSource>,
        notifier: Arc<dyn Notifier>,
        store: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            source,
            notifier,
            settings_service: SettingsService::new(store),
            settings: Settings::default(),
            prices: RunningPriceState::default(),
            connection: ConnectionState::default(),
            display: DisplayState::default(),
            chart: ChartBuffer::new(),
            stats: PollStats::default(),
        }
    }

    /// Load persisted settings. A store that cannot be read leaves the defaults.
    pub fn initialize(&mut self) -> &Settings {
        self.settings = match self.settings_service.load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to load settings, using defaults: {}", e);
                Settings::default()
            }
        };
        info!(
            "Display agent for {} initialized (threshold {}%, interval {}ms)",
            self.symbol, self.settings.alert_threshold_percent, self.settings.poll_interval_ms
        );
        &self.settings
    }

    /// Run one poll cycle.
    pub async fn poll(&mut self) -> PollOutcome {
        let request = self.begin_poll();
        let result = request.fetch().await;
        let (outcome, alert) = self.apply_sample(result);
        match alert {
            Some(alert) => {
                let sent = alert.send().await;
                self.finish_alert(outcome, &sent)
            }
            None => outcome,
        }
    }

    /// Run one poll cycle on a shared agent. The lock is only held while
    /// state changes, never across the fetch or the notification send.
    pub async fn poll_shared(agent: &Mutex<Self>) -> PollOutcome {
        let request = agent.lock().await.begin_poll();
        let result = request.fetch().await;
        let (outcome, alert) = agent.lock().await.apply_sample(result);
        match alert {
            Some(alert) => {
                let sent = alert.send().await;
                agent.lock().await.finish_alert(outcome, &sent)
            }
            None => outcome,
        }
    }

    fn begin_poll(&mut self) -> PollRequest {
        self.stats.polls += 1;
        PollRequest {
            source: self.source.clone(),
            baseline: self.prices.current_price,
        }
    }

    /// Apply a fetch result to the display state and chart. Returns the alert
    /// to deliver when the move crosses the threshold and a key is set.
    fn apply_sample(&mut self, result: Result<Sample>) -> (PollOutcome, Option<PendingAlert>) {
        let sample = match result {
            Ok(sample) => sample,
            Err(e) => {
                warn!("Failed to fetch {} sample: {}", self.symbol, e);
                self.connection = ConnectionState::Disconnected;
                self.stats.failed_polls += 1;
                return (PollOutcome::Disconnected, None);
            }
        };

        self.connection = ConnectionState::Connected;
        self.prices.record(sample.price);

        let decision = evaluate(sample.change_percent, self.settings.alert_threshold_percent);
        let now = Local::now();
        self.display = DisplayState {
            price: Some(sample.price),
            change: sample.change,
            change_percent: sample.change_percent,
            trend: Trend::of(sample.change),
            origin: Some(sample.origin),
            last_updated: Some(now),
            alert_visible: decision.triggered,
        };
        self.chart.push(time_label(&now), sample.price);

        let mut alert = None;
        if decision.triggered {
            self.stats.alerts_triggered += 1;
            if self.settings.notifications_enabled() {
                alert = Some(self.pending_alert(sample.change_percent, sample.price));
            } else {
                debug!("Alert triggered but no notification key is set");
            }
        }

        let outcome = PollOutcome::Updated {
            alert_triggered: decision.triggered,
            notification_sent: false,
        };
        (outcome, alert)
    }

    fn finish_alert(&mut self, outcome: PollOutcome, sent: &Result<()>) -> PollOutcome {
        let notification_sent = match sent {
            Ok(()) => {
                self.stats.notifications_sent += 1;
                true
            }
            Err(e) => {
                warn!("Failed to send alert for {}: {}", self.symbol, e);
                false
            }
        };
        match outcome {
            PollOutcome::Updated {
                alert_triggered, ..
            } => PollOutcome::Updated {
                alert_triggered,
                notification_sent,
            },
            PollOutcome::Disconnected => PollOutcome::Disconnected,
        }
    }

    fn pending_alert(&self, change_percent: Decimal, price: Decimal) -> PendingAlert {
        PendingAlert {
            notifier: self.notifier.clone(),
            key: self.settings.notification_key.clone(),
            message: AlertMessage::new(&self.symbol, change_percent, price),
        }
    }

    /// Parse and persist the form, then apply it. A changed poll interval
    /// only applies to poll loops started afterwards.
    pub fn save_settings(&mut self, form: &SettingsForm) -> Result<Settings> {
        let settings = self.settings_service.save(form)?;
        info!(
            "Settings saved (threshold {}%, interval {}ms)",
            settings.alert_threshold_percent, settings.poll_interval_ms
        );
        self.settings = settings.clone();
        Ok(settings)
    }

    /// Send one notification with a fixed sample move.
    pub async fn test_alert(&mut self) -> Result<()> {
        let alert = self.prepare_test_alert()?;
        alert.send().await?;
        self.stats.notifications_sent += 1;
        Ok(())
    }

    /// [`DisplayAgent::test_alert`] on a shared agent, without holding the
    /// lock during the send.
    pub async fn test_alert_shared(agent: &Mutex<Self>) -> Result<()> {
        let alert = agent.lock().await.prepare_test_alert()?;
        alert.send().await?;
        agent.lock().await.stats.notifications_sent += 1;
        Ok(())
    }

    fn prepare_test_alert(&self) -> Result<PendingAlert> {
        if !self.settings.notifications_enabled() {
            return Err(Error::MissingNotificationKey);
        }
        let price = self.prices.current_price.unwrap_or_default();
        Ok(self.pending_alert(TEST_ALERT_CHANGE_PERCENT, price))
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn prices(&self) -> &RunningPriceState {
        &self.prices
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn chart(&self) -> &ChartBuffer {
        &self.chart
    }

    pub fn stats(&self) -> PollStats {
        self.stats
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            symbol: self.symbol.clone(),
            connection: self.connection,
            prices: self.prices,
            display: self.display.clone(),
            chart: self.chart.clone(),
            settings: self.settings.clone(),
            stats: self.stats,
        }
    }
}
