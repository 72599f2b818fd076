//! Routing of inbound IRC events to notifications.
//!
//! The router owns the filter store and the pause state. Every inbound
//! channel message or action passes through [`Router::handle`], which
//! applies, in order: trusted-nick command interception, buffer playback
//! pause transitions, and filter evaluation with one notification per
//! matching pattern.

use tracing::{info, warn};

#[cfg(feature = "commands")]
use crate::common::EventKind;
use crate::common::{InboundEvent, Outcome};
use crate::filter::FilterStore;
use crate::notify::Notifier;

/// Marker a bouncer emits before replaying buffered history.
const PLAYBACK_START: &str = "Buffer Playback";
/// Marker a bouncer emits once buffer replay is done.
const PLAYBACK_END: &str = "Playback Complete";

#[cfg(feature = "commands")]
const CMD_ADD: &str = "!add ";
#[cfg(feature = "commands")]
const CMD_REMOVE: &str = "!remove ";
#[cfg(feature = "quit-command")]
const CMD_QUIT: &str = "!quit";

/// Whether filter evaluation is currently suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Normal operation, filters are evaluated.
    Active,
    /// Buffer playback in progress, notifications suppressed.
    Paused,
}

/// Routes inbound events to the notifier.
pub struct Router<N: Notifier> {
    filters: FilterStore,
    state: SessionState,
    /// The bot's own nick; commands are only honored from it.
    nick: String,
    notifier: N,
}

impl<N: Notifier> Router<N> {
    pub fn new(filters: FilterStore, nick: impl Into<String>, notifier: N) -> Self {
        Self {
            filters,
            state: SessionState::Active,
            nick: nick.into(),
            notifier,
        }
    }

    /// Current pause state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Filter patterns currently configured.
    pub fn filters(&self) -> &FilterStore {
        &self.filters
    }

    /// Process one inbound event.
    ///
    /// Returns [`Outcome::Quit`] when a graceful disconnect was requested.
    pub async fn handle(&mut self, event: InboundEvent) -> Outcome {
        #[cfg(feature = "commands")]
        if event.kind == EventKind::Message
            && event.sender == self.nick
            && self.try_filter_command(&event.body)
        {
            return Outcome::Continue;
        }

        #[cfg(feature = "quit-command")]
        if event.sender == self.nick && event.body == CMD_QUIT {
            info!("Quit requested by {}", event.sender);
            return Outcome::Quit;
        }

        match self.state {
            SessionState::Active if event.body.contains(PLAYBACK_START) => {
                info!("Pausing for buffer playback");
                self.state = SessionState::Paused;
            }
            SessionState::Paused if event.body.contains(PLAYBACK_END) => {
                info!("Unpausing from buffer playback");
                self.state = SessionState::Active;
            }
            SessionState::Paused => {}
            SessionState::Active => {
                self.notify_matches(&event).await;
            }
        }

        Outcome::Continue
    }

    /// Handle `!add` / `!remove` from the trusted nick.
    ///
    /// Returns true if the body was a filter command; other bodies fall
    /// through to normal trigger and filter evaluation.
    #[cfg(feature = "commands")]
    fn try_filter_command(&mut self, body: &str) -> bool {
        if let Some(source) = body.strip_prefix(CMD_ADD) {
            match self.filters.add(source) {
                Ok(()) => info!("Added filter pattern: {}", source),
                Err(e) => warn!("Ignoring filter pattern: {}", e),
            }
            true
        } else if let Some(source) = body.strip_prefix(CMD_REMOVE) {
            let removed = self.filters.remove(source);
            info!("Removed {} filter pattern(s) matching: {}", removed, source);
            true
        } else {
            false
        }
    }

    /// Send one notification per matching filter pattern.
    async fn notify_matches(&self, event: &InboundEvent) {
        for pattern in self.filters.matches(&event.body) {
            let message = format!("{}> {}", event.sender, event.body);
            info!("Sending notification: {}: {}", message, event.target);
            if let Err(e) = self.notifier.send(&message, &event.target).await {
                warn!("Notification delivery failed for pattern '{}': {}", pattern, e);
            }
        }
    }
}
