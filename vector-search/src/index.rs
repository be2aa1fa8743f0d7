//! Builds an in-process semantic index over a node population (spec §9:
//! "optional semantic accelerator"), grounded on `rag-store::embed_pool`'s
//! bounded fan-out shape.

use futures::stream::{self, StreamExt};
use tracing::instrument;
use trace_model::{CosineIndex, SemanticIndex};

use llm_gateway::LlmGateway;

use crate::error::VectorSearchError;

/// Embeds every `(id, text)` pair concurrently and returns a populated
/// [`SemanticIndex::InMemoryCosine`].
///
/// A single embedding failure fails the whole build rather than skipping
/// the offending entry: a partially-populated index would silently
/// under-prune some candidates with no signal that it happened. Callers
/// treat a build failure as "accelerator unavailable this run" and fall
/// back to [`trace_model::SemanticIndex::Noop`] rather than propagating it
/// as a pipeline failure, per spec §9: "the core must function correctly
/// with pure LLM reasoning".
#[instrument(skip_all, fields(items = items.len()))]
pub async fn build_index(
    gateway: &LlmGateway,
    items: Vec<(String, String)>,
    concurrency: usize,
) -> Result<SemanticIndex, VectorSearchError> {
    let embedded = stream::iter(items)
        .map(|(id, text)| async move {
            let vector = gateway.embed(&text).await?;
            Ok::<_, VectorSearchError>((id, vector))
        })
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    let mut entries = Vec::with_capacity(embedded.len());
    for result in embedded {
        entries.push(result?);
    }

    let mut index = SemanticIndex::InMemoryCosine(CosineIndex::new());
    index.reindex(entries);
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> LlmGateway {
        let cfg = llm_gateway::LlmModelConfig {
            provider: llm_gateway::LlmProvider::Ollama,
            model: "test".to_string(),
            endpoint: "http://127.0.0.1:1".to_string(),
            timeout_secs: Some(1),
            top_p: None,
            max_tokens: None,
        };
        LlmGateway::new(cfg).unwrap()
    }

    #[tokio::test]
    async fn empty_input_yields_an_empty_active_index() {
        let gateway = gateway();
        let index = build_index(&gateway, Vec::new(), 4).await.unwrap();
        assert!(index.is_active());
        assert!(index.top_k(&[1.0], 5).is_empty());
    }
}
