use pricewatch_core::constants::DEFAULT_SYMBOL;
use std::path::PathBuf;

const DEFAULT_SETTINGS_PATH: &str = "pricewatch-settings.json";
const DEFAULT_LOG_PATH: &str = "pricewatch-agent.log";

pub struct AgentConfig {
    /// Quote service base URL. `None` runs standalone on synthetic data.
    pub service_url: Option<String>,
    pub settings_path: PathBuf,
    pub symbol: String,
    pub log_path: PathBuf,
}

impl AgentConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());
        Self {
            service_url: non_empty("PW_SERVICE_URL"),
            settings_path: non_empty("PW_SETTINGS_PATH")
                .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.into())
                .into(),
            symbol: non_empty("PW_SYMBOL").unwrap_or_else(|| DEFAULT_SYMBOL.to_string()),
            log_path: non_empty("PW_AGENT_LOG")
                .unwrap_or_else(|| DEFAULT_LOG_PATH.into())
                .into(),
        }
    }

    pub fn is_standalone(&self) -> bool {
        self.service_url.is_none()
    }
}
