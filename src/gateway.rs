//! Inbound HTTP listener for alert webhooks.
//!
//! Starts an axum server on `[gateway].bind:port` and hands every
//! `POST [gateway].route` body to the [`BridgeHandler`], one call per request.
//! `GET /health` answers `ok` for liveness probes.

use crate::bridge::{BridgeHandler, BridgeResponse};
use crate::config::{Config, GatewayConfig};
use crate::delivery::WebhookClient;
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

// ── Route handlers ────────────────────────────────────────────────────────────

/// POST [gateway].route — translate an alert and forward it to Teams.
async fn handle_bridge(State(handler): State<Arc<BridgeHandler>>, body: Bytes) -> Response {
    handler.handle_bytes(&body).await.into_response()
}

async fn handle_health() -> &'static str {
    "ok"
}

impl IntoResponse for BridgeResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, self.content_type)],
            self.body,
        )
            .into_response()
    }
}

// ── Server startup ────────────────────────────────────────────────────────────

/// Build the router. Body size and, when set, request deadline are enforced
/// here rather than in the handler.
pub fn router(handler: Arc<BridgeHandler>, config: &GatewayConfig) -> Router {
    let app = Router::new()
        .route(&config.route, post(handle_bridge))
        .route("/health", get(handle_health))
        .with_state(handler)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes));

    match config.request_timeout_secs {
        #[allow(deprecated)]
        Some(secs) => app.layer(TimeoutLayer::new(Duration::from_secs(secs))),
        None => app,
    }
}

/// Start the listener. Runs until Ctrl-C.
pub async fn run(config: &Config) -> Result<()> {
    if config.teams_webhook_url.is_none() {
        tracing::warn!("gateway: TEAMS_WEBHOOK_URL is not set; deliveries will fail");
    }
    let sender = Arc::new(WebhookClient::new(config.teams_webhook_url.clone()));
    let handler = Arc::new(BridgeHandler::new(sender));
    let app = router(handler, &config.gateway);

    let addr = config.gateway.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("gateway: cannot bind {addr}"))?;
    tracing::info!("gateway: listening on {addr}{}", config.gateway.route);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("gateway: cannot listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("gateway: shutting down");
}

// ── Tests ─────────────────────────────────────────────────────────────────────
