//! Upstream forwarding — one POST to the prediction API per relayed turn.
//!
//! No retries and no caching: a call that fails is reported, and identical
//! turns produce independent upstream calls.

use agentchat_core::models::relay::{RelayRequest, extract_reply};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;

use crate::config::ResolvedUpstream;
use crate::error::{AppError, AppResult};

/// Upstream error bodies are logged up to this many bytes.
const MAX_LOGGED_BODY: usize = 4 * 1024;

/// Forward `request` to the prediction API and return the reply text.
pub async fn forward(
    client: &Client,
    upstream: &ResolvedUpstream,
    request: &RelayRequest<Value>,
) -> AppResult<String> {
    debug!(
        session_id = %request.override_config.session_id,
        history_len = request.history.len(),
        "forwarding to prediction API"
    );

    let response = client
        .post(upstream.endpoint.clone())
        .bearer_auth(&upstream.token)
        .json(request)
        .send()
        .await
        .map_err(|e| AppError::UpstreamUnreachable(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::UpstreamStatus {
            status: status.as_u16(),
            body: error_body(response).await,
        });
    }

    let data: Value = response
        .json()
        .await
        .map_err(|e| AppError::InvalidFormat(format!("response is not JSON: {e}")))?;

    extract_reply(&data)
        .map(str::to_owned)
        .ok_or_else(|| AppError::InvalidFormat(format!("no reply field in {data}")))
}

/// Read at most [`MAX_LOGGED_BODY`] bytes of an error response for the log.
async fn error_body(mut response: Response) -> String {
    let mut buf = Vec::new();
    while buf.len() <= MAX_LOGGED_BODY {
        match response.chunk().await {
            Ok(Some(chunk)) => buf.extend_from_slice(&chunk),
            Ok(None) => break,
            Err(_) if buf.is_empty() => return "<no body>".to_string(),
            Err(_) => break,
        }
    }
    excerpt(buf)
}

fn excerpt(mut buf: Vec<u8>) -> String {
    let clipped = buf.len() > MAX_LOGGED_BODY;
    buf.truncate(MAX_LOGGED_BODY);
    let mut text = String::from_utf8_lossy(&buf).into_owned();
    if clipped {
        text.push_str(" [truncated]");
    }
    text
}
