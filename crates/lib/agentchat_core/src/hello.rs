//! Greeting used by the relay health check.

/// Returns a greeting string with the crate version.
pub fn hello_world() -> String {
    format!("Hello from agentchat_core v{}", super::version())
}
