//! Chat relay handler.
//!
//! Single endpoint `POST /api/proxy` that:
//! 1. Resolves the server-held upstream endpoint and token
//! 2. Parses the body as JSON (whatever the `Content-Type`) and validates the
//!    question and session id
//! 3. Forwards the turn to the prediction API with bearer auth
//! 4. Normalizes the upstream answer into `{ "reply": ... }`

use agentchat_core::models::relay::{OverrideConfig, RelayReply, RelayRequest};
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use serde::Deserialize;
use serde_json::Value;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::services::relay;

/// Inbound body as sent by chat clients. Required fields are optional here so
/// that a missing one maps to a specific validation message. History turns
/// are opaque and forwarded as received.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    pub question: Option<String>,
    pub history: Option<Vec<Value>>,
    pub override_config: Option<ProxyOverrideConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyOverrideConfig {
    pub session_id: Option<String>,
    pub return_source_documents: Option<bool>,
}

impl ProxyRequest {
    /// Check required fields and fill defaults.
    pub fn validate(self) -> AppResult<RelayRequest<Value>> {
        let question = self
            .question
            .filter(|q| !q.is_empty())
            .ok_or_else(|| AppError::Validation("Question is required".into()))?;

        let override_config = self.override_config.unwrap_or_default();
        let session_id = override_config
            .session_id
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Validation("Session ID is required".into()))?;

        Ok(RelayRequest {
            question,
            history: self.history.unwrap_or_default(),
            override_config: OverrideConfig {
                session_id,
                return_source_documents: override_config.return_source_documents.unwrap_or(false),
            },
        })
    }
}

/// `POST /api/proxy` — relay one chat turn to the prediction API.
pub async fn proxy_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<RelayReply>> {
    let upstream = state.config.upstream.resolve()?;
    let body: ProxyRequest = serde_json::from_slice(&body?)?;
    let request = body.validate()?;

    let reply = relay::forward(&state.http, &upstream, &request).await?;
    Ok(Json(RelayReply { reply }))
}
