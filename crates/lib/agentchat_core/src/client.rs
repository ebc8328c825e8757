//! Chat client state machine.
//!
//! Owns the transcript, the input buffer, the typing indicator and the
//! session identifier. Front ends feed it auth events and user input and
//! render what it holds.
//!
//! A send is split in two halves so the front end can show the typing
//! indicator while the request is outstanding:
//!
//! 1. [`ChatClient::begin_send`] appends the user turn, clears the input,
//!    raises the typing indicator and returns a [`PendingSend`]: the
//!    [`RelayRequest`] plus the [`SendTicket`] that identifies it.
//! 2. [`ChatClient::complete_send`] takes the ticket back, appends the reply
//!    (or the apology) and clears the typing indicator. Results for any send
//!    other than the one pending are dropped.
//!
//! [`ChatClient::send`] runs both halves over a [`RelayTransport`].

use tracing::{debug, error, info, warn};

use crate::auth::{AuthError, AuthEvent, AuthUser, IdentityProvider};
use crate::models::chat::ChatMessage;
use crate::models::relay::{OverrideConfig, RelayRequest};
use crate::relay::{RelayError, RelayTransport};
use crate::session::SessionId;
use crate::transcript::Transcript;

/// Bot message shown when a relay call fails for any reason.
pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

/// Authentication state of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated {
        user: AuthUser,
        session_id: SessionId,
    },
}

/// Why a send did not go out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendSkipped {
    /// Input was empty or whitespace.
    EmptyInput,
    /// No session identifier; the user is not signed in.
    NoSession,
    /// A previous send is still waiting for its reply.
    Busy,
}

/// Result of [`ChatClient::send`] and [`ChatClient::complete_send`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Skipped(SendSkipped),
    Replied,
    Failed,
    /// The result belonged to a send that is no longer pending (the user
    /// signed out in between) and was discarded.
    Dropped,
}

/// Identifies one send from [`ChatClient::begin_send`] to
/// [`ChatClient::complete_send`]. Every send gets a new ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendTicket(u64);

/// A send that has gone out and awaits its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    pub ticket: SendTicket,
    pub request: RelayRequest,
}

#[derive(Debug)]
pub struct ChatClient {
    auth: AuthState,
    transcript: Transcript,
    input: String,
    /// Ticket of the send awaiting its result; `Some` while typing.
    pending: Option<SendTicket>,
    next_ticket: u64,
}

impl Default for ChatClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatClient {
    pub fn new() -> Self {
        Self {
            auth: AuthState::Unauthenticated,
            transcript: Transcript::new(),
            input: String::new(),
            pending: None,
            next_ticket: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Authentication
    // -----------------------------------------------------------------------

    /// Explicit auth check on load: adopt whoever the provider reports.
    pub async fn load(&mut self, identity: &dyn IdentityProvider) -> Result<(), AuthError> {
        match identity.current_user().await? {
            Some(user) => self.apply_auth_event(AuthEvent::SignedIn(user)),
            None => self.apply_auth_event(AuthEvent::SignedOut),
        }
        Ok(())
    }

    /// Apply an auth-state change.
    ///
    /// Every sign-in event derives a fresh session identifier. Signing out
    /// drops the session identifier along with the transcript.
    pub fn apply_auth_event(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn(user) => {
                let session_id = SessionId::for_user(&user.id);
                info!(user_id = %user.id, session_id = %session_id, "session started");
                self.auth = AuthState::Authenticated { user, session_id };
            }
            AuthEvent::SignedOut => {
                if matches!(self.auth, AuthState::Authenticated { .. }) {
                    info!("session ended");
                }
                self.auth = AuthState::Unauthenticated;
                self.transcript.clear();
                self.input.clear();
                self.pending = None;
            }
        }
    }

    pub fn auth_state(&self) -> &AuthState {
        &self.auth
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth, AuthState::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&AuthUser> {
        match &self.auth {
            AuthState::Authenticated { user, .. } => Some(user),
            AuthState::Unauthenticated => None,
        }
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        match &self.auth {
            AuthState::Authenticated { session_id, .. } => Some(session_id),
            AuthState::Unauthenticated => None,
        }
    }

    // -----------------------------------------------------------------------
    // Transcript & input
    // -----------------------------------------------------------------------

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn is_typing(&self) -> bool {
        self.pending.is_some()
    }

    // -----------------------------------------------------------------------
    // Sending
    // -----------------------------------------------------------------------

    /// First half of a send. On success the transcript holds the new user
    /// turn and the returned request carries the full history including it.
    pub fn begin_send(&mut self) -> Result<PendingSend, SendSkipped> {
        if self.input.trim().is_empty() {
            return Err(SendSkipped::EmptyInput);
        }
        if self.pending.is_some() {
            debug!("send ignored: reply still pending");
            return Err(SendSkipped::Busy);
        }
        let Some(session_id) = self.session_id().cloned() else {
            error!("session id is missing; message not sent");
            return Err(SendSkipped::NoSession);
        };

        let question = std::mem::take(&mut self.input);
        self.transcript.push(ChatMessage::user(question.clone()));

        let ticket = SendTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(ticket);

        Ok(PendingSend {
            ticket,
            request: RelayRequest {
                question,
                history: self.transcript.history(),
                override_config: OverrideConfig {
                    session_id: session_id.into(),
                    return_source_documents: true,
                },
            },
        })
    }

    /// Second half of a send. A result whose ticket is not the pending one
    /// (e.g. it was sent before a sign-out) is dropped.
    pub fn complete_send(
        &mut self,
        ticket: SendTicket,
        result: Result<String, RelayError>,
    ) -> SendOutcome {
        if self.pending != Some(ticket) {
            debug!(?ticket, "relay result dropped: send no longer pending");
            return SendOutcome::Dropped;
        }
        self.pending = None;

        match result {
            Ok(reply) => {
                self.transcript.push(ChatMessage::bot(reply));
                SendOutcome::Replied
            }
            Err(e) => {
                warn!("relay call failed: {e}");
                self.transcript.push(ChatMessage::bot(APOLOGY));
                SendOutcome::Failed
            }
        }
    }

    /// Send the current input through `transport`.
    pub async fn send(&mut self, transport: &dyn RelayTransport) -> SendOutcome {
        let pending = match self.begin_send() {
            Ok(pending) => pending,
            Err(skipped) => return SendOutcome::Skipped(skipped),
        };
        let result = transport.relay(&pending.request).await;
        self.complete_send(pending.ticket, result)
    }
}
