//! The display agent: one poll cycle at a time, driven by the poll loop.

mod agent_state;
mod agent_traits;
mod display_agent;
mod scheduler;

pub use agent_state::{
    AgentSnapshot, ConnectionState, DisplayState, PollStats, RunningPriceState, Trend,
};
pub use agent_traits::{Notifier, SampleSource};
pub use display_agent::{DisplayAgent, PollOutcome};
pub use scheduler::{spawn_poll_loop, start_polling};
