use crate::models::{Identity, ProfileSnapshot};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the session collaborator.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The bridge could not be reached or the response body was unreadable.
    #[error("bridge request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The bridge answered with a non-success status.
    #[error("bridge returned {status}: {body}")]
    Upstream {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Boundary to the WhatsApp session collaborator.
///
/// Session lifecycle (QR exchange, authentication, reconnects) lives on the
/// other side of this boundary; callers re-observe `is_ready` on every
/// request instead of caching it.
#[async_trait]
pub trait SessionClient: Send + Sync {
    /// Whether the session is authenticated and able to resolve numbers.
    async fn is_ready(&self) -> bool;

    /// Authentication state as reported by the session, if known.
    async fn auth_state(&self) -> Option<String>;

    /// Resolves a canonical number to a contact identity.
    ///
    /// Returns `Ok(None)` when the number has no account on the platform.
    async fn resolve_number(&self, canonical: &str) -> Result<Option<Identity>, SessionError>;

    /// Fetches profile metadata for a previously resolved identity.
    ///
    /// May fail independently of `resolve_number`; callers treat the fetch
    /// as best-effort.
    async fn get_profile(&self, serialized_id: &str) -> Result<ProfileSnapshot, SessionError>;
}

/// Status payload reported by the bridge sidecar.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BridgeStatus {
    connected: bool,
    #[serde(default)]
    auth_state: Option<String>,
}

/// Resolution payload; `id` is null when the number is not registered.
#[derive(Debug, Deserialize)]
struct BridgeResolution {
    #[serde(default)]
    id: Option<String>,
}

/// Client for the WhatsApp bridge sidecar that owns the actual session.
#[derive(Clone)]
pub struct WaBridgeClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl WaBridgeClient {
    /// Creates a new `WaBridgeClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the bridge sidecar.
    /// * `token` - Optional bearer token sent on every call.
    pub fn new(base_url: String, token: Option<String>) -> Result<Self, SessionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, SessionError> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SessionError::Upstream { status, body });
        }

        Ok(response.json().await?)
    }

    async fn status(&self) -> Result<BridgeStatus, SessionError> {
        let url = format!("{}/api/status", self.base_url);
        self.get_json(&url).await
    }
}

#[async_trait]
impl SessionClient for WaBridgeClient {
    async fn is_ready(&self) -> bool {
        match self.status().await {
            Ok(status) => status.connected,
            Err(e) => {
                tracing::warn!("Bridge status check failed, treating as not ready: {}", e);
                false
            }
        }
    }

    async fn auth_state(&self) -> Option<String> {
        self.status().await.ok().and_then(|status| status.auth_state)
    }

    async fn resolve_number(&self, canonical: &str) -> Result<Option<Identity>, SessionError> {
        let url = format!(
            "{}/api/contacts/resolve?number={}",
            self.base_url, canonical
        );
        tracing::debug!("Resolving number via bridge: {}", canonical);

        let resolution: BridgeResolution = self.get_json(&url).await?;
        Ok(resolution.id.map(|serialized| Identity { serialized }))
    }

    async fn get_profile(&self, serialized_id: &str) -> Result<ProfileSnapshot, SessionError> {
        let url = format!("{}/api/contacts/{}", self.base_url, serialized_id);
        tracing::debug!("Fetching contact profile: {}", serialized_id);

        self.get_json(&url).await
    }
}
