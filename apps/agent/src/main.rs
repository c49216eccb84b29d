mod config;
mod terminal;
mod tui;

use anyhow::Context;
use config::AgentConfig;
use pricewatch_core::agent::{start_polling, DisplayAgent, Notifier, SampleSource};
use pricewatch_core::notifiers::{LogNotifier, ServiceNotifier};
use pricewatch_core::settings::FileSettingsStore;
use pricewatch_core::sources::{ServiceSource, SyntheticSource};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::sync::{Arc, Mutex};
use terminal::{install_panic_hook, TerminalGuard};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// The terminal belongs to the dashboard, so logs go to a file.
fn init_tracing(config: &AgentConfig) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
        .with_context(|| format!("Failed to open log file {}", config.log_path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .init();
    Ok(())
}

fn build_agent(config: &AgentConfig) -> DisplayAgent {
    let (source, notifier): (Arc<dyn SampleSource>, Arc<dyn Notifier>) = match &config.service_url
    {
        Some(url) => {
            tracing::info!("Polling quote service at {}", url);
            (
                Arc::new(ServiceSource::new(url)),
                Arc::new(ServiceNotifier::new(url)),
            )
        }
        None => {
            tracing::info!("No PW_SERVICE_URL set, running standalone on synthetic data");
            (Arc::new(SyntheticSource::new()), Arc::new(LogNotifier))
        }
    };
    let store = Arc::new(FileSettingsStore::new(config.settings_path.clone()));
    DisplayAgent::new(config.symbol.clone(), source, notifier, store)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AgentConfig::from_env();
    init_tracing(&config)?;

    let mut agent = build_agent(&config);
    agent.initialize();
    let agent = Arc::new(tokio::sync::Mutex::new(agent));
    let poll_loop = start_polling(agent.clone()).await;

    let source_label = if config.is_standalone() {
        "standalone".to_string()
    } else {
        config.service_url.clone().unwrap_or_default()
    };

    install_panic_hook();
    let terminal_guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let res = tui::run_app(&mut terminal, agent, source_label).await;

    poll_loop.abort();
    drop(terminal_guard);

    if let Err(e) = &res {
        tracing::error!("Dashboard exited with error: {}", e);
    }
    res
}
