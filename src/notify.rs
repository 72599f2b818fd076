//! Push notification delivery via Pushover.
//!
//! The router talks to a [`Notifier`] rather than to Pushover directly,
//! so delivery failures surface as a `Result` the caller can log, and
//! tests can record sends without touching the network.

use serde::Serialize;
use tracing::debug;

use crate::common::error::{NotifyError, NotifyResult};

/// Pushover API endpoint for message delivery.
const PUSHOVER_API_URL: &str = "https://api.pushover.net/1/messages.json";

/// Opaque Pushover credential pair, immutable after startup.
#[derive(Debug, Clone)]
pub struct Identity {
    pub token: String,
    pub user_key: String,
}

/// Result-returning interface over the notification service.
///
/// The router only ever calls this from its own task, so no `Send`
/// bound is required on the returned future.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    /// Deliver one titled notification. No retry, no batching.
    async fn send(&self, message: &str, title: &str) -> NotifyResult<()>;
}

/// Pushover HTTP client.
#[derive(Debug, Clone)]
pub struct PushoverClient {
    http: reqwest::Client,
    identity: Identity,
}

/// Form body for the Pushover messages endpoint.
#[derive(Serialize)]
struct PushRequest<'a> {
    token: &'a str,
    user: &'a str,
    message: &'a str,
    title: &'a str,
}

impl PushoverClient {
    pub fn new(identity: Identity) -> Self {
        Self {
            http: reqwest::Client::new(),
            identity,
        }
    }
}

impl Notifier for PushoverClient {
    async fn send(&self, message: &str, title: &str) -> NotifyResult<()> {
        let request = PushRequest {
            token: &self.identity.token,
            user: &self.identity.user_key,
            message,
            title,
        };

        let response = self
            .http
            .post(PUSHOVER_API_URL)
            .form(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected { status });
        }

        debug!("Pushover accepted notification titled '{}'", title);
        Ok(())
    }
}
