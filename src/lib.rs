//! Azure Monitor → Microsoft Teams webhook bridge.
//!
//! An alert notification is decoded ([`alert`]), mapped to a connector card
//! ([`transform`], [`card`]), POSTed to the configured Teams webhook
//! ([`delivery`]), and answered with an envelope holding both ([`bridge`]).
//! [`gateway`] hosts the handler behind an axum server.

pub mod alert;
pub mod bridge;
pub mod card;
pub mod config;
pub mod delivery;
pub mod gateway;
pub mod transform;

pub use alert::{AlertContext, AlertData, AlertEssentials, AlertPayload};
pub use bridge::{BridgeError, BridgeHandler, BridgeReply, BridgeResponse};
pub use card::{MessageCard, MessageFact, MessageSection};
pub use config::Config;
pub use delivery::{CardSender, DeliveryError, WebhookClient};
pub use transform::{to_message_card, TransformError};
