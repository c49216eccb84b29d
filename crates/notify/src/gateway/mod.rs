//! Push gateway abstraction.

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{GatewayResponse, ValidNotification};

pub mod server_chan;

#[async_trait]
pub trait PushGateway: Send + Sync {
    /// Deliver one notification. Any HTTP answer from the gateway is a
    /// success at this level; only transport failures are errors.
    async fn send(&self, notification: &ValidNotification) -> Result<GatewayResponse>;
}
