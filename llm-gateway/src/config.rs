//! Provider configuration, read from the environment at CLI startup and
//! threaded down rather than read from ambient globals (SPEC_FULL §9 "no
//! global mutable state").

use std::time::Duration;

use thiserror::Error;

/// Supported LLM backends. The gateway is Ollama-only at present; OpenAI
/// is modeled so a second provider slots in the way `ai-llm-service` keeps
/// two services behind one profile abstraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    Ollama,
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProvider::Ollama => write!(f, "ollama"),
        }
    }
}

/// One model endpoint configuration. `llm-gateway` keeps a single profile
/// per [`crate::LlmGateway`] instance (extraction, classification, and
/// reconciliation all share one model); callers needing a faster/slower
/// split construct two gateways, mirroring how `LlmServiceProfiles` caches
/// one client per distinct config.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: Option<u64>,
    pub top_p: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl LlmModelConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(60))
    }

    /// Reads `{PREFIX}_MODEL`, `{PREFIX}_ENDPOINT`, `{PREFIX}_TIMEOUT_SECS`
    /// from the environment, e.g. `prefix = "TRACELINK_LLM"`.
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let model = must_env(&format!("{prefix}_MODEL"))?;
        let endpoint = must_env(&format!("{prefix}_ENDPOINT"))?;
        validate_http_endpoint(&endpoint)?;
        let timeout_secs = env_opt_u64(&format!("{prefix}_TIMEOUT_SECS"))?;

        Ok(Self {
            provider: LlmProvider::Ollama,
            model,
            endpoint,
            timeout_secs,
            top_p: None,
            max_tokens: None,
        })
    }
}

/// Errors from reading/validating gateway configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(String),
    #[error("invalid number in {var}: {reason}")]
    InvalidNumber { var: String, reason: &'static str },
    #[error("invalid endpoint `{0}`: must start with http:// or https://")]
    InvalidEndpoint(String),
}

fn must_env(name: &str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name.to_string())),
    }
}

fn env_opt_u64(name: &str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber {
                var: name.to_string(),
                reason: "expected u64",
            }),
        _ => Ok(None),
    }
}

fn validate_http_endpoint(value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidEndpoint(value.to_string()))
    }
}
