//! Shared HTTP client for the popup state API.
//!
//! Both polling clients (the operator dashboard and the embedded popup
//! widget) talk to the same two-method contract: `GET /api/popup-state` to
//! read the record, `POST` with a partial body to patch it. [`ApiClient`]
//! wraps a [`reqwest::Client`] around that contract.
//!
//! Reads are lenient by construction: the response body is parsed as loose
//! JSON and pushed through the core coercion rules, so wrongly typed fields
//! degrade to defaults instead of failing the poll. Callers choose their
//! failure posture per poll: [`ApiClient::fetch_state`] surfaces the error
//! (fail-open callers keep their previous value), while
//! [`ApiClient::fetch_state_or_hidden`] maps any failure to the hidden
//! default (fail-closed).

use popsync_core::{PopupState, StateUpdate};
use serde_json::Value;

/// Fixed request path of the state endpoint.
pub const STATE_PATH: &str = "/api/popup-state";

/// Environment variable naming the API deployment's base URL.
pub const API_URL_VAR: &str = "POPUP_API_URL";

/// A failure while talking to the state API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request failed or the server answered with an error status.
    #[error("state API request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// HTTP client bound to one API deployment.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the deployment at `base_url`.
    ///
    /// Trailing slashes are stripped before concatenation with the fixed
    /// API path.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a client from the `POPUP_API_URL` environment variable.
    ///
    /// Returns `None` when the variable is unset or empty; callers decide
    /// whether that means "use a default" (dashboard) or "stay inert"
    /// (embedded widget).
    pub fn from_env() -> Option<Self> {
        match std::env::var(API_URL_VAR) {
            Ok(url) if !url.is_empty() => Some(Self::new(url)),
            _ => None,
        }
    }

    /// The normalized base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn state_url(&self) -> String {
        format!("{}{}", self.base_url, STATE_PATH)
    }

    /// Fetch the current popup state.
    ///
    /// The body is parsed leniently: wrongly typed or missing fields coerce
    /// to their defaults rather than erroring.
    pub async fn fetch_state(&self) -> Result<PopupState, ClientError> {
        let value: Value = self
            .http
            .get(self.state_url())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(PopupState::from_value(&value))
    }

    /// Fetch the current popup state, mapping any failure to the hidden
    /// default (`show=false`, empty content).
    pub async fn fetch_state_or_hidden(&self) -> PopupState {
        match self.fetch_state().await {
            Ok(state) => state,
            Err(e) => {
                tracing::debug!(error = %e, "State poll failed, treating popup as hidden");
                PopupState::default()
            }
        }
    }

    /// Send a partial update and return the post-update state echoed by the
    /// server.
    pub async fn send(&self, update: &StateUpdate) -> Result<PopupState, ClientError> {
        let value: Value = self
            .http
            .post(self.state_url())
            .json(update)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(PopupState::from_value(&value))
    }

    /// Set the visibility flag.
    pub async fn set_show(&self, show: bool) -> Result<PopupState, ClientError> {
        self.send(&StateUpdate::show(show)).await
    }

    /// Save new popup content.
    pub async fn save_content(&self, content: &str) -> Result<PopupState, ClientError> {
        self.send(&StateUpdate::content(content)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped() {
        let client = ApiClient::new("https://popup.example/");
        assert_eq!(client.state_url(), "https://popup.example/api/popup-state");

        let client = ApiClient::new("https://popup.example//");
        assert_eq!(client.state_url(), "https://popup.example/api/popup-state");
    }

    #[test]
    fn bare_base_url_is_kept_as_is() {
        let client = ApiClient::new("http://127.0.0.1:3000");
        assert_eq!(
            client.state_url(),
            "http://127.0.0.1:3000/api/popup-state"
        );
    }
}
