//! Hello world endpoint — health check.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::AppState;
use crate::error::AppResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelloWorldResponse {
    pub greeting: String,
    /// Whether both upstream endpoint and token are set.
    pub relay_configured: bool,
}

/// `GET /api/hello` — verifies the core lib is linked and reports whether the
/// relay can reach an upstream.
pub async fn hello_world(State(state): State<AppState>) -> AppResult<Json<HelloWorldResponse>> {
    Ok(Json(HelloWorldResponse {
        greeting: agentchat_core::hello::hello_world(),
        relay_configured: state.config.upstream.is_configured(),
    }))
}
