//! # agentchat_core
//!
//! Core chat domain logic for AgentChat: the wire model shared by the relay
//! and its clients, session identifiers, the identity capability, and the
//! chat client state machine.

pub mod auth;
pub mod client;
pub mod conversations;
pub mod hello;
pub mod models;
pub mod relay;
pub mod session;
pub mod transcript;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
