use shared_types::{AppConfig, FeatureFlags, RateLimitConfig, WorkflowConfig};
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Environment variable that overrides `[workflow] endpoint`.
pub const ENDPOINT_ENV: &str = "WORKFLOW_ENDPOINT_URL";

/// Read `config.toml` (and `.env`), and store the result in the global
/// `OnceLock`. Only the first call has effect.
///
/// A missing or unparseable file yields the defaults.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let _ = dotenvy::dotenv();
        let contents = match std::fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => Some(contents),
            Err(e) => {
                eprintln!("[config] {CONFIG_PATH} not found ({e}), using defaults");
                None
            }
        };
        let config = parse_config(contents.as_deref(), std::env::var(ENDPOINT_ENV).ok());
        eprintln!(
            "[config] Feature flags: {:?}, workflow endpoint: {}",
            config.features, config.workflow.endpoint
        );
        config
    })
}

/// Build the effective config from the file contents and the endpoint override.
pub fn parse_config(contents: Option<&str>, endpoint_override: Option<String>) -> AppConfig {
    let mut config = match contents {
        Some(contents) => toml::from_str(contents).unwrap_or_else(|e| {
            eprintln!("[config] Failed to parse {CONFIG_PATH}: {e}, using defaults");
            AppConfig::default()
        }),
        None => AppConfig::default(),
    };
    if let Some(endpoint) = endpoint_override.filter(|e| !e.trim().is_empty()) {
        config.workflow.endpoint = endpoint.trim().to_string();
    }
    config
}

/// The loaded config, or the defaults if `load_config()` hasn't run yet.
pub fn app_config() -> &'static AppConfig {
    static DEFAULT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(AppConfig::default))
}

pub fn feature_flags() -> &'static FeatureFlags {
    &app_config().features
}

pub fn workflow_config() -> &'static WorkflowConfig {
    &app_config().workflow
}

pub fn rate_limit_config() -> &'static RateLimitConfig {
    &app_config().rate_limit
}
