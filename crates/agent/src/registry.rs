//! HTTP client for the central status registry.
//!
//! The agent polls `getAgentStatus` to decide whether to evaluate at
//! all, and posts `idle` back when a cycle completes. Every call is
//! bounded by a request timeout so a slow registry can never stall an
//! evaluation cycle indefinitely.

use std::time::Duration;

use serde::Deserialize;
use spindown_core::types::{AgentStatus, Appliance};

/// HTTP request timeout for a single registry call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for registry call failures.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The underlying HTTP request failed (network, DNS, timeout,
    /// undecodable body).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The registry returned a non-2xx status code.
    #[error("Registry returned HTTP {0}")]
    HttpStatus(u16),
}

/// Registry answer for one appliance.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentStatusResponse {
    pub status: AgentStatus,
    #[serde(default)]
    pub user: String,
}

/// Client bound to one appliance's registry endpoints.
pub struct RegistryClient {
    base_url: String,
    appliance: Appliance,
    client: reqwest::Client,
}

impl RegistryClient {
    /// Create a client with a pre-configured HTTP timeout.
    pub fn new(base_url: &str, appliance: Appliance) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            appliance,
            client,
        }
    }

    /// Fetch the current monitor/idle status and owning user.
    pub async fn get_status(&self) -> Result<AgentStatusResponse, RegistryError> {
        let url = format!("{}/{}/getAgentStatus", self.base_url, self.appliance);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(RegistryError::HttpStatus(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    /// Mark the appliance idle. Safe to call redundantly; the registry
    /// treats a repeated idle as a no-op success.
    pub async fn set_idle(&self) -> Result<(), RegistryError> {
        let url = format!("{}/{}/setAgentStatus", self.base_url, self.appliance);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "status": "idle" }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(RegistryError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_in_base_url_is_normalized() {
        let client = RegistryClient::new("http://registry:8001/", Appliance::Dryer);
        assert_eq!(client.base_url, "http://registry:8001");
    }

    #[test]
    fn status_response_parses_registry_wire_format() {
        let parsed: AgentStatusResponse =
            serde_json::from_str(r#"{"status":"monitor","user":"user1"}"#).unwrap();
        assert_eq!(parsed.status, AgentStatus::Monitor);
        assert_eq!(parsed.user, "user1");

        // `user` may be omitted entirely when idle.
        let parsed: AgentStatusResponse = serde_json::from_str(r#"{"status":"idle"}"#).unwrap();
        assert_eq!(parsed.status, AgentStatus::Idle);
        assert!(parsed.user.is_empty());
    }
}
