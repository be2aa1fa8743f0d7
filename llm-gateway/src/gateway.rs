//! [`LlmGateway`]: typed, retrying, schema-validated `generate`/`embed`.

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use tracing::{info, instrument, warn};

use crate::config::LlmModelConfig;
use crate::error::GatewayError;
use crate::ollama::OllamaClient;
use crate::task::TaskType;

/// Retries before a persistent-failure `GatewayError::BadOutput` (spec
/// §4.3: "retries up to N (N≈3) with exponential backoff").
const MAX_ATTEMPTS: u32 = 3;
const BASE_BACKOFF: Duration = Duration::from_millis(250);

/// One logical model endpoint, wrapped with the retry/schema contract every
/// pipeline stage calls through. Stateless beyond its HTTP client, so it is
/// cheap to construct once per CLI run and share via `Arc`.
pub struct LlmGateway {
    client: OllamaClient,
}

impl LlmGateway {
    pub fn new(cfg: LlmModelConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            client: OllamaClient::new(cfg)?,
        })
    }

    /// Generates and parses a `T` from the model's output for `task`.
    ///
    /// `T`'s `Deserialize` impl *is* the schema: on parse failure the
    /// gateway retries up to [`MAX_ATTEMPTS`] with exponential backoff,
    /// appending the parse error to the next attempt's prompt so the model
    /// can self-correct. Persistent failure surfaces as
    /// [`GatewayError::BadOutput`].
    #[instrument(skip_all, fields(task = task.label()))]
    pub async fn generate<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: Option<&str>,
        task: TaskType,
    ) -> Result<T, GatewayError> {
        let started = Instant::now();
        let mut last_error = String::new();
        let mut attempt_prompt = prompt.to_string();

        for attempt in 1..=MAX_ATTEMPTS {
            let raw = self
                .client
                .generate(&attempt_prompt, system, task.temperature())
                .await?;

            match extract_json::<T>(&raw) {
                Ok(value) => {
                    info!(
                        task = task.label(),
                        attempt,
                        latency_ms = started.elapsed().as_millis(),
                        "generation parsed"
                    );
                    return Ok(value);
                }
                Err(err) => {
                    warn!(task = task.label(), attempt, error = %err, "unparsable output, retrying");
                    last_error = err;
                    attempt_prompt = format!(
                        "{prompt}\n\nYour previous response failed to parse: {last_error}\nRespond with valid JSON only, matching the required shape exactly."
                    );
                    if attempt < MAX_ATTEMPTS {
                        tokio::time::sleep(BASE_BACKOFF * 2u32.pow(attempt - 1)).await;
                    }
                }
            }
        }

        Err(GatewayError::BadOutput {
            task: task.label(),
            attempts: MAX_ATTEMPTS,
            reason: last_error,
        })
    }

    /// Computes an embedding vector for `input`, retrying transport
    /// failures with the same backoff schedule as `generate`.
    #[instrument(skip_all)]
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, GatewayError> {
        let mut last_err = None;
        for attempt in 1..=MAX_ATTEMPTS {
            match self.client.embeddings(input).await {
                Ok(v) => return Ok(v),
                Err(err) => {
                    warn!(attempt, error = %err, "embedding call failed, retrying");
                    last_err = Some(err);
                    if attempt < MAX_ATTEMPTS {
                        tokio::time::sleep(BASE_BACKOFF * 2u32.pow(attempt - 1)).await;
                    }
                }
            }
        }
        Err(last_err.expect("loop runs at least once"))
    }
}

/// Parses `raw` as `T`, first trying it verbatim, then stripping a single
/// ```` ```json ... ``` ```` or ```` ``` ... ``` ```` fence, since models
/// reliably wrap JSON in markdown even when told not to.
fn extract_json<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    let trimmed = raw.trim();
    if let Ok(v) = serde_json::from_str(trimmed) {
        return Ok(v);
    }

    let unfenced = strip_code_fence(trimmed);
    serde_json::from_str(unfenced).map_err(|e| e.to_string())
}

fn strip_code_fence(s: &str) -> &str {
    let s = s
        .strip_prefix("```json")
        .or_else(|| s.strip_prefix("```"))
        .unwrap_or(s);
    s.strip_suffix("```").unwrap_or(s).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        value: u32,
    }

    #[test]
    fn extracts_plain_json() {
        let parsed: Sample = extract_json(r#"{"value": 7}"#).unwrap();
        assert_eq!(parsed, Sample { value: 7 });
    }

    #[test]
    fn extracts_fenced_json() {
        let raw = "```json\n{\"value\": 9}\n```";
        let parsed: Sample = extract_json(raw).unwrap();
        assert_eq!(parsed, Sample { value: 9 });
    }

    #[test]
    fn reports_parse_error_for_garbage() {
        let err = extract_json::<Sample>("not json at all").unwrap_err();
        assert!(!err.is_empty());
    }
}
