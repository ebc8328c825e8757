//! Transport seam between the chat client and the relay endpoint.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::relay::RelayRequest;

/// Failures of a single relay call as seen by the chat client.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Relay request failed: {0}")]
    Transport(String),

    #[error("Relay returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid relay response: {0}")]
    Format(String),
}

/// Sends one chat turn to the relay and returns the reply text.
#[async_trait]
pub trait RelayTransport: Send + Sync {
    async fn relay(&self, request: &RelayRequest) -> Result<String, RelayError>;
}
