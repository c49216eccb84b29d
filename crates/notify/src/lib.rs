//! Push notification delivery.
//!
//! A [`Notification`] arrives from a caller, is validated into a
//! [`ValidNotification`] and handed to a [`PushGateway`]. The gateway's
//! answer is kept verbatim in a [`GatewayResponse`] so it can be relayed.

pub mod errors;
pub mod gateway;
pub mod models;

pub use errors::NotifyError;
pub use gateway::server_chan::{ServerChanGateway, DEFAULT_SERVER_CHAN_URL};
pub use gateway::PushGateway;
pub use models::{GatewayResponse, Notification, ValidNotification};
