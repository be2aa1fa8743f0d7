//! Thin Ollama client: `/api/generate` (non-streaming) and `/api/embeddings`.
//!
//! Mirrors `ai-llm-service::services::ollama_service` almost verbatim —
//! the wire shape of Ollama's API doesn't change with the domain sitting
//! on top of it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LlmModelConfig;
use crate::error::GatewayError;

pub struct OllamaClient {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
    url_embeddings: String,
}

impl OllamaClient {
    pub fn new(cfg: LlmModelConfig) -> Result<Self, GatewayError> {
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(GatewayError::InvalidEndpoint(cfg.endpoint.clone()));
        }

        let client = reqwest::Client::builder()
            .timeout(cfg.timeout())
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_generate = format!("{base}/api/generate");
        let url_embeddings = format!("{base}/api/embeddings");

        Ok(Self {
            client,
            cfg,
            url_generate,
            url_embeddings,
        })
    }

    pub async fn generate(
        &self,
        prompt: &str,
        system: Option<&str>,
        temperature: f32,
    ) -> Result<String, GatewayError> {
        let full_prompt = match system {
            Some(sys) => format!("{sys}\n\n{prompt}"),
            None => prompt.to_string(),
        };

        let body = GenerateRequest {
            model: &self.cfg.model,
            prompt: &full_prompt,
            stream: false,
            options: GenerateOptions {
                temperature: Some(temperature),
                top_p: self.cfg.top_p,
                num_predict: self.cfg.max_tokens,
            },
        };

        debug!(url = %self.url_generate, model = %self.cfg.model, "POST generate");
        let resp = self.client.post(&self.url_generate).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = text.chars().take(240).collect::<String>();
            return Err(GatewayError::HttpStatus { status, url, snippet });
        }

        let out: GenerateResponse = resp.json().await.map_err(GatewayError::Transport)?;
        Ok(out.response)
    }

    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>, GatewayError> {
        let body = EmbeddingsRequest {
            model: &self.cfg.model,
            prompt: input,
        };

        debug!(url = %self.url_embeddings, model = %self.cfg.model, "POST embeddings");
        let resp = self
            .client
            .post(&self.url_embeddings)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_embeddings.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = text.chars().take(240).collect::<String>();
            return Err(GatewayError::HttpStatus { status, url, snippet });
        }

        let out: EmbeddingsResponse = resp.json().await.map_err(GatewayError::Transport)?;
        Ok(out.embedding)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Default, Serialize)]
struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}
