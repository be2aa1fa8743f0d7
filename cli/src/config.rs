//! Environment-driven configuration, read once at startup and threaded
//! down rather than read from ambient globals (mirrors `llm-gateway`'s own
//! `from_env` contract).

use std::time::Duration;

use llm_gateway::LlmModelConfig;

use crate::error::CliError;

/// Everything a subcommand needs, assembled once in [`crate::run`].
pub struct Settings {
    pub github_token: Option<String>,
    pub store_root: String,
    pub gateway_config: LlmModelConfig,
    /// `None` when no embedding profile is configured; subcommands fall
    /// back to `SemanticIndex::Noop` in that case (spec §9).
    pub embedding_config: Option<LlmModelConfig>,
    pub concurrency: usize,
    pub scan_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self, CliError> {
        let github_token = env_opt("GITHUB_TOKEN");
        let store_root = std::env::var("TRACELINK_STORE_ROOT").unwrap_or_else(|_| ".tracelink-store".to_string());
        let gateway_config = LlmModelConfig::from_env("TRACELINK_LLM")?;
        let embedding_config = LlmModelConfig::from_env("TRACELINK_EMBEDDING").ok();
        let concurrency = env_opt("TRACELINK_CONCURRENCY")
            .and_then(|v| v.parse().ok())
            .unwrap_or(4);
        let scan_timeout_secs: u64 = env_opt("TRACELINK_SCAN_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(120);

        Ok(Self {
            github_token,
            store_root,
            gateway_config,
            embedding_config,
            concurrency,
            scan_timeout: Duration::from_secs(scan_timeout_secs),
        })
    }

    /// `true` when `FORCE_RECREATE` is set to a truthy value, combined with
    /// a subcommand's own `--force` flag (spec §6 environment inputs).
    pub fn force_recreate_env(&self) -> bool {
        matches!(
            env_opt("FORCE_RECREATE").as_deref(),
            Some("1") | Some("true") | Some("TRUE") | Some("yes")
        )
    }

    pub fn require_github_token(&self) -> Result<&str, CliError> {
        self.github_token
            .as_deref()
            .ok_or_else(|| CliError::MissingEnv("GITHUB_TOKEN".to_string()))
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
