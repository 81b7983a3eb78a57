use axum::{extract::State, Json};

use crate::error_convert::ValidateRequest;
use crate::workflow::WorkflowClient;
use shared_types::{AppError, GenerateBackgroundRequest, GeneratedBackground};

// ---------------------------------------------------------------------------
// POST /api/backgrounds
// ---------------------------------------------------------------------------

/// Generate a background from a text description.
///
/// Forwards the trimmed description to the workflow webhook and returns its
/// HTML and CSS fragments unchanged.
#[utoipa::path(
    post,
    path = "/api/backgrounds",
    request_body = GenerateBackgroundRequest,
    responses(
        (status = 200, description = "Generated background", body = GeneratedBackground),
        (status = 422, description = "Blank description", body = AppError),
        (status = 429, description = "Rate limit exceeded", body = AppError),
        (status = 502, description = "Workflow failed or returned invalid JSON", body = AppError)
    ),
    tag = "backgrounds"
)]
pub async fn generate_background(
    State(workflow): State<WorkflowClient>,
    Json(body): Json<GenerateBackgroundRequest>,
) -> Result<Json<GeneratedBackground>, AppError> {
    body.validate_request()?;
    let description = body.description().ok_or_else(AppError::blank_description)?;

    let background = workflow.generate(&description).await?;
    Ok(Json(background))
}
