//! Relay request/response bodies.
//!
//! The same [`RelayRequest`] shape travels client → relay and relay →
//! upstream. The client builds it with typed [`HistoryTurn`]s; the relay
//! forwards whatever turns it received. Upstream replies are free-form JSON;
//! [`extract_reply`] picks the reply text out of them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::chat::HistoryTurn;

/// Upstream fields that may carry the reply text, in lookup order.
///
/// Older agent API versions answer with `reply`, newer ones with `text`.
pub const REPLY_FIELDS: [&str; 2] = ["text", "reply"];

/// Per-call overrides forwarded to the agent API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OverrideConfig {
    pub session_id: String,
    #[serde(default)]
    pub return_source_documents: bool,
}

/// A validated chat turn ready to be relayed. `H` is the history turn type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest<H = HistoryTurn> {
    pub question: String,
    #[serde(default = "Vec::new")]
    pub history: Vec<H>,
    pub override_config: OverrideConfig,
}

/// Normalized relay answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayReply {
    pub reply: String,
}

/// Error body returned by the relay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Returns the first non-empty string found under [`REPLY_FIELDS`].
pub fn extract_reply(body: &Value) -> Option<&str> {
    REPLY_FIELDS.iter().find_map(|field| {
        body.get(field)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    })
}
