//! HTTP surface for the tria triage pipeline.
//!
//! One POST endpoint accepts the raw invocation payload (the ticket object
//! itself, or an envelope whose `body` field is a JSON-encoded string of it)
//! and maps the pipeline's transport-neutral result onto HTTP statuses.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tria_pipeline::{TriagePipeline, TriageResponse};

pub const TRIAGE_ENDPOINT: &str = "/v1/triage";
pub const HEALTH_ENDPOINT: &str = "/healthz";

/// Bind address plus the shared pipeline.
#[derive(Clone)]
pub struct GatewayServerConfig {
    pub bind: String,
    pub pipeline: Arc<TriagePipeline>,
}

pub fn build_gateway_router(pipeline: Arc<TriagePipeline>) -> Router {
    Router::new()
        .route(TRIAGE_ENDPOINT, post(handle_triage))
        .route(HEALTH_ENDPOINT, get(handle_health))
        .with_state(pipeline)
}

/// Binds the listener and serves the triage router until ctrl-c.
pub async fn run_gateway_server(config: GatewayServerConfig) -> Result<()> {
    let bind_addr = config
        .bind
        .parse::<SocketAddr>()
        .with_context(|| format!("invalid --bind '{}'", config.bind))?;

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind triage gateway on {bind_addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("failed to resolve bound gateway address")?;

    tracing::info!("triage gateway listening: endpoint={TRIAGE_ENDPOINT} addr={local_addr}");

    let app = build_gateway_router(config.pipeline);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("triage gateway exited unexpectedly")
}

async fn handle_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn handle_triage(
    State(pipeline): State<Arc<TriagePipeline>>,
    Json(event): Json<Value>,
) -> Response {
    match pipeline.handle(&event).await {
        TriageResponse::Completed(outcome) => {
            (StatusCode::OK, Json(outcome.to_body())).into_response()
        }
        TriageResponse::InvalidRequest(message) => {
            (StatusCode::BAD_REQUEST, message).into_response()
        }
        TriageResponse::Failed { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": message })),
        )
            .into_response(),
    }
}
