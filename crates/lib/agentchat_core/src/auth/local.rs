//! In-memory identity provider.
//!
//! Trusts the handle it is given. Used by the terminal client and tests; a
//! hosted provider plugs in through the same [`IdentityProvider`] trait.

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, info};

use super::{AuthError, AuthEvent, AuthUser, IdentityProvider, SignInProvider};

const EVENT_CHANNEL_CAPACITY: usize = 16;

pub struct LocalIdentityProvider {
    current: RwLock<Option<AuthUser>>,
    events: broadcast::Sender<AuthEvent>,
}

impl LocalIdentityProvider {
    /// A provider with nobody signed in.
    pub fn new() -> Self {
        Self::with_current(None)
    }

    /// A provider that already has `user` signed in, as after a page reload.
    pub fn with_user(user: AuthUser) -> Self {
        Self::with_current(Some(user))
    }

    fn with_current(current: Option<AuthUser>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            current: RwLock::new(current),
            events,
        }
    }

    fn publish(&self, event: AuthEvent) {
        // No subscribers is fine.
        if self.events.send(event).is_err() {
            debug!("auth event dropped: no subscribers");
        }
    }
}

impl Default for LocalIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_handle(handle: &str) -> Result<&str, AuthError> {
    let handle = handle.trim();
    if handle.is_empty() {
        return Err(AuthError::InvalidHandle("handle must not be empty".into()));
    }
    if handle.chars().any(char::is_whitespace) {
        return Err(AuthError::InvalidHandle(format!(
            "handle must not contain whitespace: {handle:?}"
        )));
    }
    Ok(handle)
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn current_user(&self) -> Result<Option<AuthUser>, AuthError> {
        Ok(self.current.read().await.clone())
    }

    async fn sign_in(&self, provider: SignInProvider, handle: &str) -> Result<AuthUser, AuthError> {
        let handle = validate_handle(handle)?;
        let user = AuthUser {
            id: format!("{provider}-{handle}"),
            email: None,
            provider,
        };
        *self.current.write().await = Some(user.clone());
        info!(user_id = %user.id, %provider, "signed in");
        self.publish(AuthEvent::SignedIn(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let previous = self.current.write().await.take();
        if let Some(user) = previous {
            info!(user_id = %user.id, "signed out");
            self.publish(AuthEvent::SignedOut);
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}
