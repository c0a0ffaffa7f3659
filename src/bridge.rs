//! Request orchestration: parse → transform → deliver → respond.
//!
//! [`BridgeHandler`] has no knowledge of the HTTP server that hosts it. It takes
//! the raw request body and always returns a [`BridgeResponse`]; every failure
//! is mapped to a status and body through [`BridgeError`].

use crate::alert::AlertPayload;
use crate::card::MessageCard;
use crate::delivery::{CardSender, DeliveryError};
use crate::transform::{to_message_card, TransformError};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Success envelope: the card that was sent and what the webhook answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeReply {
    pub card_request: MessageCard,
    pub response: String,
}

/// Every way a bridge request can fail. The `Display` text is the response body.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("There is no request body")]
    MissingBody,
    #[error("{0}")]
    MalformedPayload(String),
    /// The body decoded but lacks a substructure the card needs. The cause is
    /// logged, never rendered.
    #[error("Illegal payload")]
    IllegalPayload(#[source] TransformError),
    #[error("{0}")]
    Delivery(#[from] DeliveryError),
}

impl BridgeError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingBody | Self::MalformedPayload(_) | Self::IllegalPayload(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-caused failures are expected and only traced; delivery failures
    /// are errors.
    fn log(&self) {
        match self {
            Self::MissingBody | Self::MalformedPayload(_) => {
                tracing::trace!("bridge: rejected request: {self}");
            }
            Self::IllegalPayload(cause) => {
                tracing::trace!("bridge: rejected request: {self}: {cause}");
            }
            Self::Delivery(cause) => {
                tracing::error!("bridge: error during serving request: {cause}");
            }
        }
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedPayload(err.to_string())
    }
}

/// Status, body and content type handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeResponse {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
}

impl BridgeResponse {
    fn json(body: String) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "application/json",
            body,
        }
    }
}

impl From<BridgeError> for BridgeResponse {
    fn from(err: BridgeError) -> Self {
        Self {
            status: err.status(),
            content_type: "text/plain; charset=utf-8",
            body: err.to_string(),
        }
    }
}

/// Handles one alert per call. Holds only read-only state, so a single
/// instance can be shared across concurrent requests.
pub struct BridgeHandler {
    sender: Arc<dyn CardSender>,
}

impl BridgeHandler {
    pub fn new(sender: Arc<dyn CardSender>) -> Self {
        Self { sender }
    }

    /// Run the pipeline on a body that may be absent.
    pub async fn handle(&self, body: Option<&str>) -> BridgeResponse {
        match self.process(body).await {
            Ok(body) => BridgeResponse::json(body),
            Err(err) => {
                err.log();
                err.into()
            }
        }
    }

    /// Run the pipeline on raw bytes as received from a server.
    ///
    /// An empty body counts as no body; bytes that are not UTF-8 are a
    /// malformed payload.
    pub async fn handle_bytes(&self, body: &[u8]) -> BridgeResponse {
        if body.is_empty() {
            return self.handle(None).await;
        }
        match std::str::from_utf8(body) {
            Ok(text) => self.handle(Some(text)).await,
            Err(e) => {
                let err = BridgeError::MalformedPayload(e.to_string());
                err.log();
                err.into()
            }
        }
    }

    async fn process(&self, body: Option<&str>) -> Result<String, BridgeError> {
        tracing::trace!("Request:\n{}", body.unwrap_or("{}"));
        let body = body.ok_or(BridgeError::MissingBody)?;
        let alert = AlertPayload::from_json(body)?;
        let card = to_message_card(&alert).map_err(BridgeError::IllegalPayload)?;
        let reply = self.deliver(card).await?;
        Ok(serde_json::to_string(&reply).map_err(DeliveryError::from)?)
    }

    async fn deliver(&self, card: MessageCard) -> Result<BridgeReply, DeliveryError> {
        let payload = serde_json::to_string(&card)?;
        let response = self.sender.send(payload).await?;
        tracing::trace!("Teams Response:\n{response}");
        Ok(BridgeReply {
            card_request: card,
            response,
        })
    }
}
