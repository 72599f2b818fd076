//! Startup configuration.
//!
//! All settings come from command-line flags; credential-bearing values
//! can also be supplied via `IRCNOTIFY_*` environment variables so they
//! stay out of shell history.

use clap::Parser;

use crate::notify::Identity;

/// Forward matching IRC channel messages as Pushover notifications.
#[derive(Debug, Parser)]
#[command(name = "ircnotify", version, about)]
pub struct Cli {
    /// Pushover API token.
    #[arg(long, env = "IRCNOTIFY_TOKEN")]
    pub token: String,

    /// Pushover user key.
    #[arg(long, env = "IRCNOTIFY_USER_KEY")]
    pub user_key: String,

    /// IRC server to connect to.
    #[arg(long, default_value = "127.0.0.1", env = "IRCNOTIFY_HOST")]
    pub host: String,

    /// IRC server port.
    #[arg(long, default_value_t = 6667, env = "IRCNOTIFY_PORT")]
    pub port: u16,

    /// Use TLS for the IRC connection.
    ///
    /// Certificate verification is DISABLED when this is on; see README.
    #[arg(long)]
    pub tls: bool,

    /// Password for the IRC server (e.g. a bouncer password).
    #[arg(long, env = "IRCNOTIFY_PASSWORD")]
    pub password: Option<String>,

    /// Nick to register with. In-channel commands are only honored from
    /// this nick.
    #[arg(long, default_value = "ircuser")]
    pub nick: String,

    /// Username to register with.
    #[arg(long, default_value = "ircuser")]
    pub user: String,

    /// Real name to register with.
    #[arg(long, default_value = "ircuser")]
    pub real_name: String,

    /// Initial filter patterns (regular expressions).
    pub patterns: Vec<String>,
}

impl Cli {
    /// The Pushover credential pair.
    pub fn identity(&self) -> Identity {
        Identity {
            token: self.token.clone(),
            user_key: self.user_key.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["ircnotify", "--token", "t", "--user-key", "u"]);
        assert_eq!(cli.host, "127.0.0.1");
        assert_eq!(cli.port, 6667);
        assert!(!cli.tls);
        assert_eq!(cli.password, None);
        assert_eq!(cli.nick, "ircuser");
        assert_eq!(cli.user, "ircuser");
        assert_eq!(cli.real_name, "ircuser");
        assert!(cli.patterns.is_empty());
    }

    #[test]
    fn test_positional_patterns() {
        let cli = parse(&[
            "ircnotify",
            "--token",
            "t",
            "--user-key",
            "u",
            "error",
            "(?i)urgent",
        ]);
        assert_eq!(cli.patterns, vec!["error", "(?i)urgent"]);
    }

    #[test]
    fn test_connection_flags() {
        let cli = parse(&[
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
        ]);
        assert_eq!(cli.host, "irc.example.net");
        assert_eq!(cli.port, 6697);
        assert!(cli.tls);
        assert_eq!(cli.password.as_deref(), Some("hunter2"));
        assert_eq!(cli.nick, "watcher");
    }

    #[test]
    fn test_env_fallbacks_and_flag_precedence() {
        // Every other test passes --token/--user-key explicitly, so these
        // process-wide vars cannot leak into a concurrently running test.
        std::env::set_var("IRCNOTIFY_TOKEN", "env-token");
        std::env::set_var("IRCNOTIFY_USER_KEY", "env-key");

        // Credentials are filled from the environment when flags are absent.
        let cli = parse(&["ircnotify"]);
        assert_eq!(cli.token, "env-token");
        assert_eq!(cli.user_key, "env-key");

        // An explicit flag overrides the environment.
        let cli = parse(&["ircnotify", "--token", "flag-token"]);
        assert_eq!(cli.token, "flag-token");
        assert_eq!(cli.user_key, "env-key");

        std::env::remove_var("IRCNOTIFY_TOKEN");
        std::env::remove_var("IRCNOTIFY_USER_KEY");
    }

    #[test]
    fn test_identity_from_flags() {
        let cli = parse(&["ircnotify", "--token", "tok", "--user-key", "key"]);
        let identity = cli.identity();
        assert_eq!(identity.token, "tok");
        assert_eq!(identity.user_key, "key");
    }
}
