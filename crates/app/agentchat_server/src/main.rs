//! AgentChat relay server binary.
//!
//! Serves `POST /api/proxy` and `GET /api/hello`. The prediction API endpoint
//! and token are read from flags or the environment (a `.env` file is loaded
//! first).

use agentchat_api::config::{ApiConfig, ENV_API_ENDPOINT, ENV_API_TOKEN, UpstreamConfig};
use clap::Parser;
use tracing::{info, warn};

/// CLI arguments for the relay server.
#[derive(Parser, Debug)]
#[command(name = "agentchat_server", about = "AgentChat relay server", version)]
struct Args {
    /// Interface to bind.
    #[arg(long, env = "AGENTCHAT_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "AGENTCHAT_PORT", default_value_t = 3100)]
    port: u16,

    /// Prediction API endpoint that chat turns are relayed to.
    #[arg(long, env = ENV_API_ENDPOINT)]
    api_endpoint: Option<String>,

    /// Bearer token for the prediction API.
    #[arg(long, env = ENV_API_TOKEN, hide_env_values = true)]
    api_token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,agentchat_api=debug,agentchat_core=debug"
                    .parse()
                    .unwrap()
            }),
        )
        .init();

    let args = Args::parse();

    let config = ApiConfig {
        bind_addr: format!("{}:{}", args.host, args.port),
        upstream: UpstreamConfig::new(args.api_endpoint, args.api_token),
    };

    if !config.upstream.is_configured() {
        warn!(
            "prediction API is not fully configured ({ENV_API_ENDPOINT} / {ENV_API_TOKEN}); \
             relay calls will fail until it is"
        );
    }

    let app = agentchat_api::router(agentchat_api::AppState::new(config.clone()));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
