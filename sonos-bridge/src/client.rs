//! HTTP client for the outbound side of the bridge.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use bridge_state::GroupDescriptor;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin GET client against the control API.
///
/// Every operation is fire-and-forget from the caller's point of view:
/// failures are logged and surface as `None`, never as errors, since the
/// authoritative state comes back asynchronously through the webhook.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Client for the control API at `host:port`.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            base_url: format!("http://{}:{}", host.into(), port),
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// GET one path and decode the JSON reply.
    ///
    /// Returns `None` on connection errors, non-success status codes and
    /// non-JSON bodies, each logged at warn level.
    pub async fn get(&self, path: &str) -> Option<Value> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(%url, "outbound request");

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(%url, %err, "request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(%url, status = %response.status(), "request rejected");
            return None;
        }

        match response.json().await {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(%url, %err, "reply was not JSON");
                None
            }
        }
    }

    /// Fetch the current zone topology from `/zones`.
    pub async fn zones(&self) -> Option<Vec<GroupDescriptor>> {
        let value = self.get("zones").await?;
        match serde_json::from_value(value) {
            Ok(groups) => Some(groups),
            Err(err) => {
                warn!(%err, "zones reply had unexpected shape");
                None
            }
        }
    }
}
