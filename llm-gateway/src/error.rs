//! Gateway-level failures. Messages carry an `[llm-gateway]` prefix so
//! bubbled-up errors in pipeline logs are easy to attribute, the way
//! `ai-llm-service` tags its own error strings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("[llm-gateway] invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("[llm-gateway] transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("[llm-gateway] unexpected HTTP status {status} from {url}: {snippet}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
        snippet: String,
    },

    /// The model's output never parsed against the expected shape after
    /// exhausting retries (spec §4.3: "persistent failure => LLMBadOutput").
    #[error("[llm-gateway] task `{task}` produced unusable output after {attempts} attempt(s): {reason}")]
    BadOutput {
        task: &'static str,
        attempts: u32,
        reason: String,
    },

    #[error("[llm-gateway] task `{task}` timed out after {attempts} attempt(s)")]
    Timeout { task: &'static str, attempts: u32 },
}
