//! Interactive chat session: reads lines, follows auth events, renders.

use std::io::Write;

use agentchat_core::auth::{AuthEvent, IdentityProvider};
use agentchat_core::client::{ChatClient, SendOutcome, SendSkipped};
use agentchat_core::relay::RelayTransport;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use crate::input::{self, Input};
use crate::render;
use crate::Result;

/// Whether the read loop keeps going after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct ChatSession<I, T, W> {
    identity: I,
    transport: T,
    client: ChatClient,
    out: W,
}

impl<I, T, W> ChatSession<I, T, W>
where
    I: IdentityProvider,
    T: RelayTransport,
    W: Write,
{
    pub fn new(identity: I, transport: T, out: W) -> Self {
        Self {
            identity,
            transport,
            client: ChatClient::new(),
            out,
        }
    }

    pub fn identity(&self) -> &I {
        &self.identity
    }

    #[cfg(test)]
    pub fn client(&self) -> &ChatClient {
        &self.client
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Check who is signed in and draw the first view.
    pub async fn start(&mut self) -> Result<()> {
        self.client.load(&self.identity).await?;
        render::view(&mut self.out, &self.client)?;
        self.out.flush()?;
        Ok(())
    }

    /// Follow an auth-state change and redraw.
    pub fn on_auth_event(&mut self, event: AuthEvent) -> Result<()> {
        self.client.apply_auth_event(event);
        writeln!(self.out)?;
        render::view(&mut self.out, &self.client)?;
        self.out.flush()?;
        Ok(())
    }

    pub async fn on_line(&mut self, line: &str) -> Result<Flow> {
        match input::parse(line) {
            Input::Quit => return Ok(Flow::Quit),
            Input::Help => render::help(&mut self.out, self.client.is_authenticated())?,
            Input::Invalid(hint) => writeln!(self.out, "{hint}")?,
            Input::SignIn { provider, handle } => {
                if let Err(e) = self.identity.sign_in(provider, &handle).await {
                    writeln!(self.out, "Sign-in failed: {e}")?;
                }
            }
            Input::SignOut => self.identity.sign_out().await?,
            Input::Topics if self.client.is_authenticated() => render::topics(&mut self.out)?,
            Input::Topics => render::sign_in_view(&mut self.out)?,
            Input::Message(text) => self.send(text).await?,
        }
        self.out.flush()?;
        Ok(Flow::Continue)
    }

    async fn send(&mut self, text: String) -> Result<()> {
        if !self.client.is_authenticated() {
            return Ok(render::sign_in_view(&mut self.out)?);
        }

        self.client.set_input(text);
        let pending = match self.client.begin_send() {
            Ok(pending) => pending,
            Err(SendSkipped::EmptyInput) => return Ok(()),
            Err(SendSkipped::Busy) => {
                return Ok(writeln!(self.out, "Still waiting for the last reply.")?);
            }
            Err(SendSkipped::NoSession) => return Ok(render::sign_in_view(&mut self.out)?),
        };

        render::typing(&mut self.out)?;
        self.out.flush()?;

        let result = self.transport.relay(&pending.request).await;
        if self.client.complete_send(pending.ticket, result) == SendOutcome::Dropped {
            return Ok(());
        }

        if let Some(reply) = self.client.transcript().messages().last() {
            render::message(&mut self.out, reply)?;
        }
        Ok(())
    }
}

/// Drive `session` from stdin until `/quit` or end of input.
///
/// Auth events are handled before pending input so that a `/signin` takes
/// effect before the next line is read.
pub async fn run<I, T, W>(mut session: ChatSession<I, T, W>) -> Result<()>
where
    I: IdentityProvider,
    T: RelayTransport,
    W: Write,
{
    let mut events = session.identity().subscribe();
    session.start().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            biased;

            event = events.recv() => match event {
                Ok(event) => session.on_auth_event(event)?,
                Err(RecvError::Lagged(n)) => log::warn!("missed {n} auth events"),
                Err(RecvError::Closed) => break,
            },
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if session.on_line(&line).await? == Flow::Quit {
                    break;
                }
            }
        }
    }

    Ok(())
}
