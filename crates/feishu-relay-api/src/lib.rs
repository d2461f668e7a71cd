//! # Feishu Relay HTTP Service
//!
//! HTTP server for receiving GitHub `workflow_job` webhooks and relaying
//! them to a Feishu incoming webhook as interactive card messages.
//!
//! This service provides:
//! - The webhook relay endpoint with signature verification
//! - Health and readiness endpoints
//!
//! The handler pipeline is: capture raw body, verify the inbound signature
//! against those exact bytes, filter to completed `workflow_job` events,
//! transform to a card message, deliver downstream. Every other event yields
//! a no-op success response without touching Feishu.

pub mod config;
pub mod errors;
pub mod responses;


use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use chrono::Utc;
use feishu_relay_core::{
    CardMessage, FeishuClient, SignatureValidator, WebhookHeaders, WebhookRequest,
    WorkflowJobEvent, WORKFLOW_JOB_EVENT,
};
use std::{collections::HashMap, sync::Arc};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

pub use config::{FeishuConfig, GithubConfig, LoggingConfig, ServerConfig, ServiceConfig};
pub use errors::{ConfigError, ServiceError, WebhookHandlerError};
pub use responses::{HealthResponse, IgnoredResponse, ReadinessResponse, RelaySuccess};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state.
///
/// Immutable after construction; cloned per request. There is no mutable
/// state shared across invocations.
#[derive(Clone)]
pub struct AppState {
    /// Configuration for the service
    pub config: ServiceConfig,

    /// Inbound signature validator. `None` means no webhook secret is
    /// configured and verification is skipped (open relay mode).
    pub signature_validator: Option<Arc<dyn SignatureValidator>>,

    /// Outbound Feishu delivery client
    pub feishu: Arc<FeishuClient>,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        config: ServiceConfig,
        signature_validator: Option<Arc<dyn SignatureValidator>>,
        feishu: Arc<FeishuClient>,
    ) -> Self {
        Self {
            config,
            signature_validator,
            feishu,
        }
    }
}

// ============================================================================
// HTTP Server
// ============================================================================

/// Create the HTTP router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let webhook_routes =
        Router::new().route(&state.config.server.webhook_path, post(handle_webhook));

    let health_routes = Router::new()
        .route("/health", get(handle_health_check))
        .route("/ready", get(handle_readiness_check));

    Router::new()
        .merge(webhook_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .into_inner(),
        )
        .with_state(state)
}

/// Start the HTTP server.
///
/// Serves until SIGINT or SIGTERM, then shuts down gracefully, allowing
/// in-flight requests to complete.
pub async fn start_server(
    config: ServiceConfig,
    signature_validator: Option<Arc<dyn SignatureValidator>>,
    feishu: Arc<FeishuClient>,
) -> Result<(), ServiceError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, signature_validator, feishu);
    let app = create_router(state);

    let listener =
        tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| ServiceError::BindFailed {
                address: addr.clone(),
                message: e.to_string(),
            })?;

    info!("Starting HTTP server on {}", addr);

    let shutdown_signal = async {
        let ctrl_c = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C signal handler");
        };

        #[cfg(unix)]
        let terminate = async {
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM signal handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
            },
            _ = terminate => {
                info!("Received SIGTERM, initiating graceful shutdown");
            },
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| ServiceError::ServerFailed {
            message: e.to_string(),
        })?;

    info!("HTTP server shutdown complete");
    Ok(())
}

// ============================================================================
// Webhook Handler
// ============================================================================

/// Handle a GitHub webhook request.
///
/// The body arrives as [`Bytes`], captured before any parsing so that
/// signature verification operates on the literal bytes received. Only a
/// `workflow_job` event with `action == "completed"` reaches Feishu; every
/// other combination is acknowledged with HTTP 200 and no downstream call.
#[instrument(skip(state, headers, body))]
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, WebhookHandlerError> {
    let header_map: HashMap<String, String> = headers
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_lowercase(),
                v.to_str().unwrap_or("").to_string(),
            )
        })
        .collect();

    let webhook_headers = WebhookHeaders::from_http_headers(&header_map)?;
    let request = WebhookRequest::new(webhook_headers, body);

    // Verification first, against the raw bytes, before any parsing or
    // filtering. When no validator is configured the relay is open.
    if let Some(validator) = &state.signature_validator {
        validator
            .validate(&request.body, request.signature())
            .await?;
    }

    if request.event_type() != WORKFLOW_JOB_EVENT {
        info!(
            event_type = %request.event_type(),
            delivery_id = request.delivery_id().unwrap_or("-"),
            "Ignoring event"
        );
        return Ok((StatusCode::OK, Json(IgnoredResponse::new())).into_response());
    }

    let event = WorkflowJobEvent::from_slice(&request.body)?;

    if !event.is_completed() {
        info!(
            action = %event.action,
            delivery_id = request.delivery_id().unwrap_or("-"),
            "Ignoring workflow_job event that is not completed"
        );
        return Ok((StatusCode::OK, Json(IgnoredResponse::new())).into_response());
    }

    let message = CardMessage::for_completed_job(&event);
    state.feishu.deliver(message).await?;

    info!(
        repository = %event.repository.full_name,
        job = %event.workflow_job.name,
        conclusion = event.workflow_job.conclusion.as_deref().unwrap_or("unknown"),
        delivery_id = request.delivery_id().unwrap_or("-"),
        latency_ms = (Utc::now() - request.received_at).num_milliseconds(),
        "Relayed workflow job to Feishu"
    );

    Ok((StatusCode::OK, Json(RelaySuccess::new())).into_response())
}

// ============================================================================
// Health Check Handlers
// ============================================================================

/// Basic liveness check.
#[instrument(skip_all)]
async fn handle_health_check(State(_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check.
///
/// The relay holds no connections or caches; once it is serving requests it
/// is ready.
#[instrument(skip_all)]
async fn handle_readiness_check(State(_state): State<AppState>) -> Json<ReadinessResponse> {
    Json(ReadinessResponse {
        ready: true,
        timestamp: Utc::now(),
    })
}
