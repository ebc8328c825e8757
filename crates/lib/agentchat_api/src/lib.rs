//! # agentchat_api
//!
//! HTTP relay API library for AgentChat.

pub mod config;
pub mod error;
pub mod handlers;
pub mod services;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{hello, proxy};

/// Route paths served by [`router`].
pub mod routes {
    pub const GET_API_HELLO: &str = "/api/hello";
    pub const POST_API_PROXY: &str = "/api/proxy";
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Outbound HTTP client (pooled, shared across requests).
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(routes::GET_API_HELLO, get(hello::hello_world))
        .route(routes::POST_API_PROXY, post(proxy::proxy_handler))
        .layer(cors)
        .with_state(state)
}
