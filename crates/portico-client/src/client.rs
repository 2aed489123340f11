//! Async REST client for the portal API.

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use portico_common::id::{PortalId, UserId};
use portico_common::models::{PortalNotifications, RosterEntry, parse_roster};

use crate::error::{ClientError, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for a portal backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g. `https://portico.example.com`).
    pub base_url: String,
    /// Bearer token attached to every request, when present.
    pub bearer_token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bearer_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Async portal API client.
///
/// Cheap to clone; all clones share the same connection pool.
///
/// ```rust,no_run
/// use portico_client::{ClientConfig, PortalClient};
/// use portico_common::id::PortalId;
///
/// #[tokio::main]
/// async fn main() -> portico_client::Result<()> {
///     let client = PortalClient::new(ClientConfig::new("https://portico.example.com"))?;
///     let payload = client.notifications(&PortalId::from("p1")).await?;
///     println!("{} pending requests", payload.join_requests.len());
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct PortalClient {
    client: Client,
    base_url: String,
}

impl PortalClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }
        let parsed = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "unsupported scheme `{}`",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .default_headers({
                let mut h = reqwest::header::HeaderMap::new();
                if let Some(ref token) = config.bearer_token {
                    h.insert(
                        reqwest::header::AUTHORIZATION,
                        reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
                            .map_err(|e| ClientError::Other(e.to_string()))?,
                    );
                }
                h.insert(
                    reqwest::header::CONTENT_TYPE,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                h
            })
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Normalized base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Internal ──────────────────────────────────────────────────────────────

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, path, "Sending portal API request");
        let mut req = self.client.request(method, &url);
        if let Some(b) = body {
            req = req.json(b);
        }
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned));
            warn!(path, status = status.as_u16(), "Portal API request failed");
            return Err(ClientError::Api { status: status.as_u16(), message });
        }
        Ok(resp)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.send(Method::GET, path, None).await?;
        if resp.status() == StatusCode::NO_CONTENT {
            return serde_json::from_value(Value::Null).map_err(ClientError::Json);
        }
        Ok(resp.json::<T>().await?)
    }

    /// POST where any success body is irrelevant and dropped unread.
    async fn post(&self, path: &str, body: &Value) -> Result<()> {
        self.send(Method::POST, path, Some(body)).await?;
        Ok(())
    }

    // ── Notifications ─────────────────────────────────────────────────────────

    /// Pending join requests and recent members for a portal.
    pub async fn notifications(&self, portal: &PortalId) -> Result<PortalNotifications> {
        self.get_json(&format!("/api/portals/{portal}/notifications"))
            .await
    }

    /// Approve a pending join request.
    pub async fn approve_member(&self, portal: &PortalId, user: &UserId) -> Result<()> {
        self.post(
            &format!("/api/portals/{portal}/approve-member"),
            &serde_json::json!({ "userId": user }),
        )
        .await
    }

    /// Reject a pending join request.
    pub async fn reject_member(&self, portal: &PortalId, user: &UserId) -> Result<()> {
        self.post(
            &format!("/api/portals/{portal}/reject-member"),
            &serde_json::json!({ "userId": user }),
        )
        .await
    }

    // ── Members ───────────────────────────────────────────────────────────────

    /// Portal roster, parsed tolerantly slot by slot.
    pub async fn members(&self, portal: &PortalId) -> Result<Vec<Option<RosterEntry>>> {
        let raw: Vec<Value> = self
            .get_json(&format!("/api/portals/{portal}/members"))
            .await?;
        Ok(parse_roster(raw))
    }
}
