//! Terminal dashboard for the display agent.

mod form;
mod view;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use pricewatch_core::agent::{AgentSnapshot, DisplayAgent};
use pricewatch_core::settings::SettingsForm;
use ratatui::{backend::Backend, Terminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};

pub use form::FormState;

const TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// Work the key handler hands off to the agent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    TestAlert,
    SaveSettings(SettingsForm),
}

pub struct App {
    pub snapshot: AgentSnapshot,
    pub source_label: String,
    pub form: Option<FormState>,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,
}

impl App {
    pub fn new(snapshot: AgentSnapshot, source_label: impl Into<String>) -> Self {
        Self {
            snapshot,
            source_label: source_label.into(),
            form: None,
            status: None,
            should_quit: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if let Some(form) = self.form.as_mut() {
            match key.code {
                KeyCode::Esc => self.form = None,
                KeyCode::Tab | KeyCode::Down => form.next_field(),
                KeyCode::BackTab | KeyCode::Up => form.previous_field(),
                KeyCode::Backspace => form.backspace(),
                KeyCode::Char(c) => form.input(c),
                KeyCode::Enter => {
                    let submitted = form.to_form();
                    self.form = None;
                    return Some(Command::SaveSettings(submitted));
                }
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('t') => return Some(Command::TestAlert),
            KeyCode::Char('s') => {
                self.form = Some(FormState::from_settings(&self.snapshot.settings));
            }
            _ => {}
        }
        None
    }
}

/// Run a command against the agent off the UI thread and report the result.
fn dispatch(
    command: Command,
    agent: Arc<Mutex<DisplayAgent>>,
    status_tx: mpsc::UnboundedSender<StatusMessage>,
) {
    tokio::spawn(async move {
        let status = match command {
            Command::TestAlert => match DisplayAgent::test_alert_shared(&agent).await {
                Ok(()) => StatusMessage::Info("Test notification sent!".to_string()),
                Err(e) => {
                    tracing::warn!("Test alert failed: {}", e);
                    StatusMessage::Error(e.to_string())
                }
            },
            Command::SaveSettings(form) => match agent.lock().await.save_settings(&form) {
                Ok(_) => StatusMessage::Info("Settings saved!".to_string()),
                Err(e) => {
                    tracing::error!("Failed to save settings: {}", e);
                    StatusMessage::Error(format!("Failed to save settings: {}", e))
                }
            },
        };
        let _ = status_tx.send(status);
    });
}

pub async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    agent: Arc<Mutex<DisplayAgent>>,
    source_label: String,
) -> Result<()> {
    let (status_tx, mut status_rx) = mpsc::unbounded_channel();
    let mut app = App::new(agent.lock().await.snapshot(), source_label);

    loop {
        // Another command may hold the lock; keep drawing the last snapshot.
        if let Ok(guard) = agent.try_lock() {
            app.snapshot = guard.snapshot();
        }
        while let Ok(status) = status_rx.try_recv() {
            app.status = Some(status);
        }

        terminal.draw(|f| view::draw(f, &app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if let Some(command) = app.handle_key(key) {
                    dispatch(command, agent.clone(), status_tx.clone());
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
