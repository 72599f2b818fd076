//! Canonical message types for session-to-router communication.
//!
//! Every inbound IRC event is turned into a discrete [`InboundEvent`]
//! before it reaches the router, so the routing logic stays independent
//! of the IRC client library's delivery model.

/// Kind of inbound chat event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// An ordinary channel or private message (PRIVMSG).
    Message,
    /// A CTCP ACTION ("/me does something").
    Action,
}

/// A single inbound chat event, decoded from the IRC stream.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    pub kind: EventKind,
    /// Nick of the message source.
    pub sender: String,
    /// Destination the message was delivered to (usually a channel).
    pub target: String,
    /// Message body (for actions, the action text without CTCP framing).
    pub body: String,
}

impl InboundEvent {
    pub fn message(sender: impl Into<String>, target: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Message,
            sender: sender.into(),
            target: target.into(),
            body: body.into(),
        }
    }

    pub fn action(sender: impl Into<String>, target: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Action,
            sender: sender.into(),
            target: target.into(),
            body: body.into(),
        }
    }
}

/// What the event loop should do after the router has seen an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep processing events.
    Continue,
    /// A graceful disconnect was requested.
    Quit,
}
