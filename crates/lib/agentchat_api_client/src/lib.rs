//! # agentchat_api_client
//!
//! Typed HTTP client for the AgentChat relay API.

use agentchat_core::models::relay::{ErrorResponse, RelayReply, RelayRequest};
use agentchat_core::relay::{RelayError, RelayTransport};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Path of the relay endpoint, relative to the server base URL.
pub const PROXY_PATH: &str = "api/proxy";

/// Client for `POST /api/proxy`.
#[derive(Debug, Clone)]
pub struct RelayClient {
    endpoint: Url,
    http: Client,
}

impl RelayClient {
    /// Build a client for the relay served at `base_url`
    /// (e.g. `http://127.0.0.1:3100`).
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, http: Client) -> Result<Self, url::ParseError> {
        let mut base: Url = base_url.parse()?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            endpoint: base.join(PROXY_PATH)?,
            http,
        })
    }

    /// Full URL of the relay endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RelayTransport for RelayClient {
    async fn relay(&self, request: &RelayRequest) -> Result<String, RelayError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|e| e.error)
                .unwrap_or_else(|_| "<no error body>".to_string());
            debug!(status = status.as_u16(), %message, "relay returned an error");
            return Err(RelayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<RelayReply>()
            .await
            .map(|r| r.reply)
            .map_err(|e| RelayError::Format(e.to_string()))
    }
}
