use log::debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::display_agent::DisplayAgent;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Poll immediately, then every `interval`, until the handle is aborted.
///
/// The interval is fixed for the lifetime of the loop. The agent stays
/// unlocked while a fetch is in flight.
pub fn spawn_poll_loop(agent: Arc<Mutex<DisplayAgent>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval.max(MIN_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let outcome = DisplayAgent::poll_shared(&agent).await;
            debug!("Poll cycle finished: {:?}", outcome);
        }
    })
}

/// Start the poll loop with the agent's current poll interval. The interval
/// is read once here; later settings changes do not reschedule the loop.
pub async fn start_polling(agent: Arc<Mutex<DisplayAgent>>) -> JoinHandle<()> {
    let interval = agent.lock().await.settings().poll_interval();
    spawn_poll_loop(agent, interval)
}
