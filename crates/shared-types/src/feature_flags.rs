use serde::{Deserialize, Serialize};

/// Webhook the generator posts descriptions to when nothing else is configured.
pub const DEFAULT_WORKFLOW_ENDPOINT: &str =
    "https://dbork.app.n8n.cloud/webhook/Fundo-Magico-SZPC";

/// Feature flags controlling optional behaviour.
///
/// Loaded from `config.toml` at server startup and exposed to clients
/// via a server function. Every field defaults to `false`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    /// Export traces and logs over OTLP.
    #[serde(default)]
    pub telemetry: bool,
    /// Render generated markup inside a sandboxed iframe instead of the page.
    #[serde(default)]
    pub sandboxed_preview: bool,
}

/// Location of the remote workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_endpoint() -> String {
    DEFAULT_WORKFLOW_ENDPOINT.to_string()
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

/// Sliding-window limit on `/api/*` requests per client. `max_requests = 0` disables it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateLimitConfig {
    #[serde(default)]
    pub max_requests: u32,
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    /// Key clients by the first `X-Forwarded-For` hop instead of the peer
    /// address. Only safe behind a proxy that overwrites the header.
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

fn default_window_secs() -> u64 {
    60
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 0,
            window_secs: default_window_secs(),
            trust_forwarded_for: false,
        }
    }
}

impl RateLimitConfig {
    pub fn enabled(&self) -> bool {
        self.max_requests > 0
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}
