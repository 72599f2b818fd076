//! IRC session handling.
//!
//! Wraps the `irc` client crate: builds its connection config from our
//! CLI settings, turns raw PRIVMSG / CTCP ACTION lines into
//! [`InboundEvent`]s, and drives the event loop. Events are dispatched to
//! the router one at a time off the client stream, so no locking is
//! needed around the filter store or pause state.

use anyhow::Result;
use futures::StreamExt;
use irc::client::prelude::*;
use irc::client::ClientStream;
use tracing::info;

use crate::common::{InboundEvent, Outcome};
use crate::config::Cli;
use crate::notify::Notifier;
use crate::router::Router;

/// CTCP delimiter byte, as a char.
const CTCP_MARKER: char = '\u{1}';

/// Build the `irc` crate connection config.
///
/// When TLS is requested, certificate verification is disabled. This is a
/// deliberate carried-over default for self-signed bouncer certs and is
/// called out in the README.
pub fn irc_config(cli: &Cli) -> Config {
    Config {
        server: Some(cli.host.clone()),
        port: Some(cli.port),
        use_tls: Some(cli.tls),
        dangerously_accept_invalid_certs: Some(cli.tls),
        password: cli.password.clone(),
        nickname: Some(cli.nick.clone()),
        username: Some(cli.user.clone()),
        realname: Some(cli.real_name.clone()),
        ..Config::default()
    }
}

/// Decode one raw IRC message into an inbound chat event.
///
/// Server numerics, lines without a source nick, and non-PRIVMSG commands
/// are ignored.
pub fn classify(message: &Message) -> Option<InboundEvent> {
    let sender = message.source_nickname()?;
    match &message.command {
        Command::PRIVMSG(target, body) => match parse_action(body) {
            Some(action) => Some(InboundEvent::action(sender, target, action)),
            None => Some(InboundEvent::message(sender, target, body)),
        },
        _ => None,
    }
}

/// Extract the action text from a CTCP ACTION body, if it is one.
fn parse_action(body: &str) -> Option<&str> {
    let inner = body.strip_prefix(CTCP_MARKER)?;
    // Some clients omit the closing marker.
    let inner = inner.strip_suffix(CTCP_MARKER).unwrap_or(inner);
    inner.strip_prefix("ACTION ")
}

/// Drain the client stream until the connection closes.
///
/// Stream end or a stream error is a disconnect, which is fatal by
/// design: the caller exits the process rather than reconnecting.
pub async fn run<N: Notifier>(
    sender: Sender,
    mut stream: ClientStream,
    router: &mut Router<N>,
) -> Result<()> {
    while let Some(message) = stream.next().await.transpose()? {
        if let Command::Response(Response::RPL_ENDOFMOTD | Response::ERR_NOMOTD, _) =
            message.command
        {
            info!("Finished connect");
        }

        if let Some(event) = classify(&message) {
            if router.handle(event).await == Outcome::Quit {
                info!("Requesting graceful quit");
                sender.send(Command::QUIT(Some("ircnotify signing off".to_string())))?;
                // Keep draining until the server closes the stream.
            }
        }
    }

    info!("Disconnected");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::EventKind;
    use clap::Parser;

    fn parse_line(line: &str) -> Message {
        line.parse::<Message>().unwrap()
    }

    #[test]
    fn test_classify_privmsg() {
        let message = parse_line(":alice!user@host PRIVMSG #ops :error: disk full");
        let event = classify(&message).unwrap();
        assert_eq!(event.kind, EventKind::Message);
        assert_eq!(event.sender, "alice");
        assert_eq!(event.target, "#ops");
        assert_eq!(event.body, "error: disk full");
    }

    #[test]
    fn test_classify_ctcp_action() {
        let message = parse_line(":bob!user@host PRIVMSG #ops :\u{1}ACTION waves\u{1}");
        let event = classify(&message).unwrap();
        assert_eq!(event.kind, EventKind::Action);
        assert_eq!(event.sender, "bob");
        assert_eq!(event.target, "#ops");
        assert_eq!(event.body, "waves");
    }

    #[test]
    fn test_classify_action_without_closing_marker() {
        let message = parse_line(":bob!user@host PRIVMSG #ops :\u{1}ACTION waves");
        let event = classify(&message).unwrap();
        assert_eq!(event.kind, EventKind::Action);
        assert_eq!(event.body, "waves");
    }

    #[test]
    fn test_classify_other_ctcp_is_a_plain_message() {
        let message = parse_line(":bob!user@host PRIVMSG #ops :\u{1}VERSION\u{1}");
        let event = classify(&message).unwrap();
        assert_eq!(event.kind, EventKind::Message);
    }

    #[test]
    fn test_classify_ignores_server_numerics() {
        let message = parse_line(":irc.example.net 001 ircuser :Welcome to IRC");
        assert!(classify(&message).is_none());
    }

    #[test]
    fn test_classify_ignores_non_privmsg() {
        let message = parse_line(":alice!user@host JOIN #ops");
        assert!(classify(&message).is_none());
    }

    #[test]
    fn test_irc_config_from_cli() {
        let cli = Cli::try_parse_from([
            "ircnotify",
            "--token",
            "t",
            "--user-key",
            "u",
            "--host",
            "irc.example.net",
            "--port",
            "6697",
            "--tls",
            "--password",
            "hunter2",
            "--nick",
            "watcher",
        ])
        .unwrap();

        let config = irc_config(&cli);
        assert_eq!(config.server.as_deref(), Some("irc.example.net"));
        assert_eq!(config.port, Some(6697));
        assert_eq!(config.use_tls, Some(true));
        assert_eq!(config.dangerously_accept_invalid_certs, Some(true));
        assert_eq!(config.password.as_deref(), Some("hunter2"));
        assert_eq!(config.nickname.as_deref(), Some("watcher"));
    }

    #[test]
    fn test_irc_config_without_tls_verifies_certs() {
        let cli = Cli::try_parse_from(["ircnotify", "--token", "t", "--user-key", "u"]).unwrap();
        let config = irc_config(&cli);
        assert_eq!(config.use_tls, Some(false));
        assert_eq!(config.dangerously_accept_invalid_certs, Some(false));
    }
}
