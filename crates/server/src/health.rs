use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::OnceLock;
use std::time::Instant;

use crate::workflow::WorkflowClient;

static START_TIME: OnceLock<(Instant, DateTime<Utc>)> = OnceLock::new();

/// Record the application start time. Call once during startup.
pub fn record_start_time() {
    START_TIME.get_or_init(|| (Instant::now(), Utc::now()));
}

/// Health check response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Host of the configured workflow webhook.
    pub workflow_host: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Health check handler. Does not call the webhook.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(workflow): State<WorkflowClient>) -> Json<HealthResponse> {
    let start = START_TIME.get();

    Json(HealthResponse {
        status: "ok".to_string(),
        workflow_host: workflow.endpoint_host(),
        started_at: start.map(|(_, at)| *at),
        uptime_seconds: start.map(|(t, _)| t.elapsed().as_secs()).unwrap_or(0),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
