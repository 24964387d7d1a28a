//! Remote key-value backend (Upstash-style REST API).
//!
//! Stores the full composite record under a single key via
//! `GET {base}/get/{key}` and `POST {base}/set/{key}` with bearer-token
//! auth. The stored value is the persisted record serialized as a JSON
//! string; the REST API wraps it in a `{"result": ...}` envelope.
//!
//! Loads never fail outward: network errors, missing keys, and malformed
//! payloads all yield `None`, leaving the store on its cached value. Saves
//! surface a `Result` that the store's best-effort writes log and drop;
//! a failed remote write means multi-instance consistency is not
//! guaranteed, which is the documented trade-off.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::BackendError;
use crate::state::PopupState;

use super::{PersistedRecord, StateBackend};

/// Key under which the composite record is stored.
const STATE_KEY: &str = "popup-state";

/// REST client for a remote key-value store.
pub struct RemoteBackend {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl RemoteBackend {
    /// Create a backend for the given REST endpoint and bearer token.
    ///
    /// A trailing slash on the URL is stripped before path concatenation.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            token: token.into(),
        }
    }

    fn command_url(&self, command: &str) -> String {
        format!("{}/{}/{}", self.base_url, command, STATE_KEY)
    }

    async fn fetch_record(&self) -> Result<Option<PopupState>, BackendError> {
        let envelope: Value = self
            .http
            .get(self.command_url("get"))
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // `result` is the stored string, or null when the key is absent.
        let Some(raw) = envelope.get("result").and_then(Value::as_str) else {
            return Ok(None);
        };

        let record: Value = serde_json::from_str(raw)?;
        Ok(Some(PopupState::from_value(&record)))
    }
}

#[async_trait]
impl StateBackend for RemoteBackend {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn load(&self) -> Option<PopupState> {
        match self.fetch_record().await {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "Remote state load failed, using cached value");
                None
            }
        }
    }

    async fn save(&self, state: &PopupState) -> Result<(), BackendError> {
        let value = serde_json::to_string(&PersistedRecord::new(state))?;

        self.http
            .post(self.command_url("set"))
            .bearer_auth(&self.token)
            .body(value)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
