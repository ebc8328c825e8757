use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "agentchat_cli", about = "AgentChat terminal chat client", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat {
        /// Base URL of the AgentChat relay server.
        #[arg(
            long,
            env = "AGENTCHAT_RELAY_URL",
            default_value = "http://127.0.0.1:3100"
        )]
        relay_url: String,
    },
    /// Print the version.
    Version,
}
