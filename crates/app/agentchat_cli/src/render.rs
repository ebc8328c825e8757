//! Terminal rendering of the sign-in view and the transcript.

use std::io::{self, Write};

use agentchat_core::auth::{AuthUser, SignInProvider};
use agentchat_core::client::ChatClient;
use agentchat_core::conversations::STARTERS;
use agentchat_core::models::chat::{ChatMessage, Sender};

pub const TITLE: &str = "AI Agent Chatbot";
const USER_PREFIX: &str = "you › ";
const BOT_PREFIX: &str = "bot › ";
const TYPING: &str = "Typing...";

pub fn sign_in_view(w: &mut impl Write) -> io::Result<()> {
    writeln!(w, "Sign In to {TITLE}")?;
    let providers: Vec<_> = SignInProvider::ALL.iter().map(|p| p.as_str()).collect();
    writeln!(w, "  /signin <{}> <handle>", providers.join("|"))?;
    writeln!(w, "  /quit")
}

pub fn header(w: &mut impl Write, user: &AuthUser) -> io::Result<()> {
    writeln!(w, "{TITLE} — signed in as {} via {}", user.id, user.provider)?;
    writeln!(w, "Type a message, or /topics, /signout, /quit.")
}

pub fn message(w: &mut impl Write, message: &ChatMessage) -> io::Result<()> {
    let prefix = match message.sender {
        Sender::User => USER_PREFIX,
        Sender::Bot => BOT_PREFIX,
    };
    let indent = " ".repeat(prefix.chars().count());
    let mut lines = message.text.lines();
    writeln!(w, "{prefix}{}", lines.next().unwrap_or(""))?;
    for line in lines {
        writeln!(w, "{indent}{line}")?;
    }
    Ok(())
}

pub fn typing(w: &mut impl Write) -> io::Result<()> {
    writeln!(w, "{BOT_PREFIX}{TYPING}")
}

pub fn topics(w: &mut impl Write) -> io::Result<()> {
    writeln!(w, "Conversations:")?;
    for starter in STARTERS {
        writeln!(w, "  - {}", starter.title)?;
    }
    Ok(())
}

pub fn help(w: &mut impl Write, signed_in: bool) -> io::Result<()> {
    if signed_in {
        writeln!(w, "Commands: /topics, /signout, /help, /quit")
    } else {
        writeln!(w, "Commands: /signin <google|github> <handle>, /help, /quit")
    }
}

/// Full view: the sign-in prompt when signed out, otherwise the header and
/// the whole transcript.
pub fn view(w: &mut impl Write, client: &ChatClient) -> io::Result<()> {
    let Some(user) = client.user() else {
        return sign_in_view(w);
    };
    header(w, user)?;
    for m in client.transcript().messages() {
        message(w, m)?;
    }
    if client.is_typing() {
        typing(w)?;
    }
    Ok(())
}
