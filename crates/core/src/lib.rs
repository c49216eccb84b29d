//! Display agent for a single instrument.
//!
//! The agent polls a [`SampleSource`](agent::SampleSource), keeps the running
//! price, a bounded chart buffer and the user's settings, and asks a
//! [`Notifier`](agent::Notifier) to push an alert when the change crosses the
//! configured threshold.

pub mod agent;
pub mod alerts;
pub mod chart;
pub mod constants;
pub mod errors;
pub mod notifiers;
pub mod settings;
pub mod sources;
pub mod utils;

pub use errors::{Error, Result};
