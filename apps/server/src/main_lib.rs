use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::config::Config;
use pricewatch_market_data::{AlphaVantageProvider, QuoteProvider, QuoteService};
use pricewatch_notify::{PushGateway, ServerChanGateway};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub quote_service: Arc<QuoteService>,
    pub push_gateway: Arc<dyn PushGateway>,
    pub started_at: DateTime<Utc>,
}

pub fn init_tracing() {
    let log_format = std::env::var("PW_LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("text") {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    } else {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider: Option<Arc<dyn QuoteProvider>> = match &config.alpha_vantage_api_key {
        Some(api_key) => {
            tracing::info!("Quote provider: Alpha Vantage ({})", config.symbol);
            Some(Arc::new(AlphaVantageProvider::with_base_url(
                api_key.clone(),
                config.alpha_vantage_url.clone(),
            )))
        }
        None => {
            tracing::warn!("No Alpha Vantage API key configured, serving synthetic quotes");
            None
        }
    };
    tracing::info!("Quote fallback policy: {}", config.quote_fallback);

    let quote_service = Arc::new(QuoteService::new(
        provider,
        config.symbol.clone(),
        config.quote_fallback,
    ));
    let push_gateway: Arc<dyn PushGateway> =
        Arc::new(ServerChanGateway::new(config.push_gateway_url.clone()));

    Ok(Arc::new(AppState {
        quote_service,
        push_gateway,
        started_at: Utc::now(),
    }))
}
