use dioxus::prelude::*;
use shared_types::{FeatureFlags, GeneratedBackground};

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

/// Get the current feature flags. Flags are not sensitive.
#[server]
pub async fn get_feature_flags() -> Result<FeatureFlags, ServerFnError> {
    Ok(crate::config::feature_flags().clone())
}

/// Ask the workflow to generate a background for `description`.
///
/// Blank descriptions are rejected before any outbound call. Upstream
/// failures come back as a JSON-encoded `AppError`.
#[cfg_attr(feature = "server", tracing::instrument(skip(description)))]
#[server]
pub async fn generate_background(
    description: String,
) -> Result<GeneratedBackground, ServerFnError> {
    use shared_types::{AppError, Description};

    let description = Description::parse(&description)
        .ok_or_else(|| AppError::blank_description().into_server_fn_error())?;

    crate::workflow::workflow_client()
        .generate(&description)
        .await
        .map_err(|e| e.into_server_fn_error())
}
