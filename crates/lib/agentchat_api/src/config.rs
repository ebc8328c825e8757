//! API server configuration.

use std::fmt;

use url::Url;

use crate::error::{AppError, AppResult};

/// Environment variables holding the upstream settings.
pub const ENV_API_ENDPOINT: &str = "PREDICTION_API_ENDPOINT";
pub const ENV_API_TOKEN: &str = "PREDICTION_API_TOKEN";

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3100").
    pub bind_addr: String,
    /// Where relayed chat turns go.
    pub upstream: UpstreamConfig,
}

/// Server-held upstream endpoint and bearer token. Either may be missing.
#[derive(Clone, Default)]
pub struct UpstreamConfig {
    endpoint: Option<String>,
    token: Option<String>,
}

/// Upstream settings after validation.
#[derive(Clone)]
pub struct ResolvedUpstream {
    pub endpoint: Url,
    pub token: String,
}

impl UpstreamConfig {
    /// Blank values count as missing.
    pub fn new(endpoint: Option<String>, token: Option<String>) -> Self {
        fn non_blank(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }
        Self {
            endpoint: non_blank(endpoint),
            token: non_blank(token),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some() && self.token.is_some()
    }

    /// Validate the upstream settings for one relay call.
    pub fn resolve(&self) -> AppResult<ResolvedUpstream> {
        let (Some(endpoint), Some(token)) = (&self.endpoint, &self.token) else {
            return Err(AppError::Config(format!(
                "missing prediction API configuration (endpoint set: {}, token set: {})",
                self.endpoint.is_some(),
                self.token.is_some()
            )));
        };

        let endpoint: Url = endpoint
            .parse()
            .map_err(|e| AppError::Config(format!("invalid endpoint URL: {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "unsupported endpoint scheme: {}",
                endpoint.scheme()
            )));
        }

        Ok(ResolvedUpstream {
            endpoint,
            token: token.clone(),
        })
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
