// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use agentchat_api_client::RelayClient;
use agentchat_core::auth::LocalIdentityProvider;
use clap::Parser;
use cli::{Cli, Commands};
use session::ChatSession;

mod cli;
mod input;
mod logging;
mod render;
mod session;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    logging::init()?;

    let args = Cli::parse();

    match &args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::Chat { relay_url } => {
            let transport = RelayClient::new(relay_url)?;
            log::info!("relaying to {}", transport.endpoint());
            let session = ChatSession::new(
                LocalIdentityProvider::new(),
                transport,
                std::io::stdout(),
            );
            session::run(session).await?;
        }
    }

    Ok(())
}
