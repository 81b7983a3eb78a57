use axum::extract::FromRef;

use crate::workflow::WorkflowClient;

/// Shared state for the REST router.
#[derive(Clone)]
pub struct AppState {
    pub workflow: WorkflowClient,
}

impl AppState {
    /// State backed by the process-wide workflow client.
    pub fn from_config() -> Self {
        Self {
            workflow: crate::workflow::workflow_client().clone(),
        }
    }
}

impl FromRef<AppState> for WorkflowClient {
    fn from_ref(state: &AppState) -> Self {
        state.workflow.clone()
    }
}
