//! ircnotify - IRC to Pushover notification forwarder
//!
//! Connects to an IRC server (typically behind a bouncer), watches
//! channel messages and actions against a set of regex filters, and
//! forwards matching lines as Pushover notifications.

mod common;
mod config;
mod filter;
mod notify;
mod router;
mod session;

use anyhow::Result;
use clap::Parser;
use irc::client::Client;
use tokio::signal;
use tracing::{error, info, warn};

use config::Cli;
use filter::FilterStore;
use notify::PushoverClient;
use router::Router;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("ircnotify v{} starting...", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    let filters = FilterStore::from_sources(&cli.patterns);
    info!(
        "Watching with {} filter pattern(s) as {} on {}:{}",
        filters.len(),
        cli.nick,
        cli.host,
        cli.port
    );

    let notifier = PushoverClient::new(cli.identity());
    let mut router = Router::new(filters, cli.nick.clone(), notifier);

    info!("Connecting");
    let mut client = Client::from_config(session::irc_config(&cli))
        .await
        .map_err(|e| {
            error!("Failed to connect to {}:{}: {}", cli.host, cli.port, e);
            e
        })?;

    // Take the stream before identifying so no early lines are missed.
    let stream = client.stream()?;
    client.identify()?;

    let sender = client.sender();

    // The session future must keep being polled after a shutdown signal:
    // polling the client stream is what flushes the queued QUIT to the
    // wire. The signal branch only wins the select once the grace period
    // expires without the server closing the connection.
    tokio::select! {
        result = session::run(sender.clone(), stream, &mut router) => {
            result?;
        }
        _ = async {
            shutdown_signal().await;
            info!("Shutdown signal received - requesting graceful quit...");
            if let Err(e) = sender.send(irc::proto::Command::QUIT(Some(
                "ircnotify signing off".to_string(),
            ))) {
                error!("Failed to send QUIT: {}", e);
            }
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        } => {
            warn!("Timed out waiting for the server to close the connection");
        }
    }

    info!("Goodbye");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
