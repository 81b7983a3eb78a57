use shared_types::{AppError, Description, GenerateBackgroundRequest, GeneratedBackground};
use std::sync::OnceLock;

use crate::error_convert::ReqwestErrorExt;

/// Client for the remote workflow that turns a description into HTML and CSS.
///
/// One POST per call: no auth header, no retry, no timeout.
#[derive(Debug, Clone)]
pub struct WorkflowClient {
    http: reqwest::Client,
    endpoint: String,
}

/// Shared client, built on first use from the loaded config.
static WORKFLOW: OnceLock<WorkflowClient> = OnceLock::new();

pub fn workflow_client() -> &'static WorkflowClient {
    WORKFLOW.get_or_init(|| WorkflowClient::new(crate::config::workflow_config().endpoint.clone()))
}

impl WorkflowClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// Host part of the endpoint, for diagnostics.
    pub fn endpoint_host(&self) -> Option<String> {
        reqwest::Url::parse(&self.endpoint)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
    }

    /// POST `{"description": …}` and read the `{"code", "style"}` reply.
    ///
    /// The body is decoded whatever the status code; a non-2xx status is
    /// only logged. Any JSON other than `null` is a background, see
    /// [`GeneratedBackground::from_value`].
    #[tracing::instrument(skip(self, description), fields(endpoint = %self.endpoint, bytes = description.as_str().len()))]
    pub async fn generate(&self, description: &Description) -> Result<GeneratedBackground, AppError> {
        let body = GenerateBackgroundRequest::from(description.clone());

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| e.into_app_error())?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "Workflow returned a non-success status");
        }

        let text = response.text().await.map_err(|e| e.into_app_error())?;
        let reply: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            tracing::error!(error = %e, status = %status, "Workflow response is not valid JSON");
            AppError::from(e)
        })?;
        let background = GeneratedBackground::from_value(&reply).ok_or_else(|| {
            tracing::error!(status = %status, "Workflow response is null");
            AppError::upstream("Workflow response is null")
        })?;

        tracing::info!(
            has_code = background.code.is_some(),
            has_style = background.stylesheet().is_some(),
            "Background generated"
        );
        Ok(background)
    }
}
