//! Identity capability consumed by the chat client.
//!
//! The client never talks to a concrete identity provider; it only needs the
//! current user on load and a stream of [`AuthEvent`]s afterwards.

pub mod local;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;

pub use local::LocalIdentityProvider;

/// External sign-in providers offered on the sign-in view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SignInProvider {
    Google,
    Github,
}

impl SignInProvider {
    pub const ALL: &[SignInProvider] = &[SignInProvider::Google, SignInProvider::Github];

    pub fn as_str(self) -> &'static str {
        match self {
            SignInProvider::Google => "google",
            SignInProvider::Github => "github",
        }
    }
}

impl fmt::Display for SignInProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignInProvider {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(SignInProvider::Google),
            "github" => Ok(SignInProvider::Github),
            other => Err(AuthError::UnknownProvider(other.to_string())),
        }
    }
}

/// A signed-in user as reported by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
    pub provider: SignInProvider,
}

/// Auth-state change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(AuthUser),
    SignedOut,
}

/// Identity provider errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unknown sign-in provider: {0}")]
    UnknownProvider(String),

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[error("Identity provider error: {0}")]
    Provider(String),
}

/// Minimal identity capability: sign in, sign out, current user, and a live
/// subscription to auth-state changes.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The user currently signed in, if any.
    async fn current_user(&self) -> Result<Option<AuthUser>, AuthError>;

    /// Sign in through `provider` as `handle`.
    async fn sign_in(&self, provider: SignInProvider, handle: &str) -> Result<AuthUser, AuthError>;

    /// Sign the current user out. Signing out while signed out is a no-op.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Subscribe to auth-state changes made after this call.
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}
