//! Outbound delivery of a serialized card to the Teams incoming webhook.
//!
//! [`CardSender`] is the seam the bridge handler depends on; [`WebhookClient`]
//! is the production implementation over `reqwest`.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error("Teams webhook URL is not configured (set TEAMS_WEBHOOK_URL)")]
    MissingUrl,
    #[error("invalid Teams webhook URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Sends a JSON body to the downstream webhook and returns the raw response text.
#[async_trait]
pub trait CardSender: Send + Sync {
    async fn send(&self, body: String) -> Result<String, DeliveryError>;
}

/// POSTs to a fixed webhook URL read once at construction.
///
/// The URL is only parsed at call time, so a missing or bad setting surfaces
/// as a [`DeliveryError`] on the first request rather than at startup.
/// Redirects are disabled: a POST should land exactly where configured.
pub struct WebhookClient {
    client: reqwest::Client,
    url: Option<String>,
}

impl WebhookClient {
    pub fn new(url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_default();
        Self { client, url }
    }

    fn target(&self) -> Result<Url, DeliveryError> {
        let url = self.url.as_deref().ok_or(DeliveryError::MissingUrl)?;
        Url::parse(url).map_err(|e| DeliveryError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl CardSender for WebhookClient {
    async fn send(&self, body: String) -> Result<String, DeliveryError> {
        let url = self.target()?;
        let resp = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            tracing::warn!(%status, "Teams webhook returned non-success status");
        }
        Ok(text)
    }
}
