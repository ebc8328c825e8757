//! Binary tests — run `agentchat_cli` with scripted stdin.

use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("agentchat_cli").expect("binary");
    // Nothing listens here; these tests never send a chat message.
    cmd.env("AGENTCHAT_RELAY_URL", "http://127.0.0.1:9");
    cmd
}

#[test]
fn version_prints_package_version() {
    cli()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn chat_starts_at_sign_in_view() {
    cli()
        .arg("chat")
        .write_stdin("/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Sign In to AI Agent Chatbot"));
}

#[test]
fn sign_in_then_out_round_trip() {
    cli()
        .arg("chat")
        .write_stdin("/signin github alice\n/topics\n/signout\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("signed in as github-alice via github"))
        .stdout(predicate::str::contains("Task Planning"));
}

#[test]
fn invalid_relay_url_fails() {
    Command::cargo_bin("agentchat_cli")
        .expect("binary")
        .args(["chat", "--relay-url", "not a url"])
        .write_stdin("/quit\n")
        .assert()
        .failure();
}

#[test]
fn end_of_input_exits_cleanly() {
    cli().arg("chat").write_stdin("").assert().success();
}
