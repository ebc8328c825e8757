// Session identifiers
//
// One identifier per sign-in: the user id plus a fresh v4 UUID. The agent API
// keys its conversation memory on it, so a new sign-in starts a new memory.
// Nothing here persists it.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier attached to every relay call made during one signed-in session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a new session identifier for `user_id`.
    pub fn for_user(user_id: &str) -> Self {
        Self(format!("{user_id}-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}
