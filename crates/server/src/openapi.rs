use axum::Router;
use shared_types::{AppError, AppErrorKind, GenerateBackgroundRequest, GeneratedBackground};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::health;
use crate::rate_limit::RateLimitState;
use crate::rest;
use crate::state::AppState;

/// OpenAPI documentation for the API.
#[derive(OpenApi)]
#[openapi(
    paths(
        rest::background::generate_background,
        health::health_check,
    ),
    components(schemas(
        AppError, AppErrorKind,
        GenerateBackgroundRequest, GeneratedBackground,
        health::HealthResponse,
    )),
    tags(
        (name = "backgrounds", description = "Magic background generation"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Magic Background API",
        description = "Turns a text description into an HTML and CSS background",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Build an Axum router that serves the API docs at `/docs`,
/// the health check at `/health` and the REST API at `/api/*`.
pub fn api_router(state: AppState) -> Router {
    let limits = crate::config::rate_limit_config();

    let api = if limits.enabled() {
        rest::api_router_with_rate_limit(RateLimitState::from_config(limits))
    } else {
        rest::api_router()
    };

    Router::new()
        .merge(api)
        .route("/health", axum::routing::get(health::health_check))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
