//! Orchestrates filter -> group -> suggest -> dedup -> emit (spec §4.11).

use futures::stream::{self, StreamExt};
use tracing::instrument;

use impact_trace::Finding;
use llm_gateway::LlmGateway;

use crate::dedup::dedup_against_prior;
use crate::error::RecommendError;
use crate::filter::filter_findings;
use crate::group::group_by_document;
use crate::model::Recommendation;
use crate::suggest::suggest_for_document;

/// Runs the full recommendation pipeline over one PR's scored findings.
///
/// Suggestion generation fans out one call per target document,
/// concurrently (spec §5: "suggestion generation parallelize over ...
/// target documents").
#[instrument(skip_all, fields(findings = findings.len(), prior = prior.len()))]
pub async fn recommend(
    gateway: &LlmGateway,
    findings: Vec<Finding>,
    prior: &[Recommendation],
    concurrency: usize,
) -> Result<Vec<Recommendation>, RecommendError> {
    let filtered = filter_findings(findings);
    let groups = group_by_document(filtered);

    let generated = stream::iter(groups)
        .map(|group| async move { suggest_for_document(gateway, &group).await })
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    let mut all = Vec::new();
    for result in generated {
        all.extend(result?);
    }

    Ok(dedup_against_prior(all, prior))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_findings_yields_no_recommendations() {
        let cfg = llm_gateway::LlmModelConfig {
            provider: llm_gateway::LlmProvider::Ollama,
            model: "test".to_string(),
            endpoint: "http://127.0.0.1:1".to_string(),
            timeout_secs: Some(1),
            top_p: None,
            max_tokens: None,
        };
        let gateway = LlmGateway::new(cfg).unwrap();
        let result = recommend(&gateway, Vec::new(), &[], 4).await.unwrap();
        assert!(result.is_empty());
    }
}
