//! SMS completion notifications.
//!
//! Delivers the fixed "appliance finished" message through an SMS
//! gateway (HTTP POST with basic auth). Delivery is fire-and-forget
//! from the evaluation loop's perspective: failures are logged by the
//! caller and never retried within the same cycle.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;

use crate::config::SmsConfig;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for notification delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The underlying HTTP request failed (network, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway returned an unexpected status code.
    #[error("SMS gateway returned HTTP {0}")]
    HttpStatus(u16),
}

#[derive(Debug, Serialize)]
struct SmsPayload<'a> {
    message: &'a str,
    #[serde(rename = "phoneNumbers")]
    phone_numbers: Vec<&'a str>,
}

/// Sends completion messages through the configured SMS gateway.
pub struct SmsNotifier {
    config: SmsConfig,
    /// Registry user identifier -> destination phone number.
    phone_book: HashMap<String, String>,
    /// When set, every configured number is notified instead of only
    /// the monitor owner's.
    notify_all: bool,
    client: reqwest::Client,
}

impl SmsNotifier {
    pub fn new(config: SmsConfig, phone_book: HashMap<String, String>, notify_all: bool) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            config,
            phone_book,
            notify_all,
            client,
        }
    }

    /// Resolve the destination numbers for a completion owned by
    /// `user`. Empty when the user is unknown and broadcast is off.
    pub fn recipients_for(&self, user: &str) -> Vec<&str> {
        if self.notify_all {
            let mut numbers: Vec<&str> = self.phone_book.values().map(String::as_str).collect();
            numbers.sort_unstable();
            return numbers;
        }
        self.phone_book
            .get(user)
            .map(|n| vec![n.as_str()])
            .unwrap_or_default()
    }

    /// Deliver `message` for a completion owned by `user`.
    ///
    /// An unknown user is skipped with a log line rather than treated
    /// as an error; there is simply nobody to tell.
    pub async fn notify(&self, user: &str, message: &str) -> Result<(), NotifyError> {
        let recipients = self.recipients_for(user);
        if recipients.is_empty() {
            tracing::warn!(user, "Unknown user, skipping SMS notification");
            return Ok(());
        }

        let payload = SmsPayload {
            message,
            phone_numbers: recipients,
        };

        let response = self
            .client
            .post(&self.config.url)
            .basic_auth(&self.config.user, Some(&self.config.password))
            .json(&payload)
            .send()
            .await?;

        // The gateway answers 200 on synchronous delivery and 202 on
        // queued delivery; anything else is a failure.
        match response.status().as_u16() {
            200 | 202 => {
                tracing::info!(user, "SMS sent successfully");
                Ok(())
            }
            other => Err(NotifyError::HttpStatus(other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
