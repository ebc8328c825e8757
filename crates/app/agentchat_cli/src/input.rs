//! Parsing of lines typed at the chat prompt.

use agentchat_core::auth::SignInProvider;

/// What a line typed by the user asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    SignIn {
        provider: SignInProvider,
        handle: String,
    },
    SignOut,
    Topics,
    Help,
    Quit,
    /// A chat message. Blank lines parse to an empty message.
    Message(String),
    /// A malformed or unknown `/command`, with a hint for the user.
    Invalid(String),
}

pub fn parse(line: &str) -> Input {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return Input::Message(line.trim_end_matches(['\r', '\n']).to_string());
    };

    let mut parts = command.split_whitespace();
    match parts.next().unwrap_or("") {
        "signin" => {
            let (Some(provider), Some(handle), None) = (parts.next(), parts.next(), parts.next())
            else {
                return Input::Invalid("usage: /signin <google|github> <handle>".into());
            };
            match provider.parse() {
                Ok(provider) => Input::SignIn {
                    provider,
                    handle: handle.to_string(),
                },
                Err(e) => Input::Invalid(e.to_string()),
            }
        }
        "signout" => Input::SignOut,
        "topics" => Input::Topics,
        "help" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => Input::Invalid(format!("unknown command: /{other} (try /help)")),
    }
}
