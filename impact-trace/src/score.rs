//! Likelihood/severity scoring (spec §4.10 step 4).

use tracing::instrument;

use llm_gateway::{LlmGateway, TaskType};

use crate::error::ImpactTraceError;
use crate::model::{Finding, LlmScoreBatch};

const SYSTEM_PROMPT: &str = "You assess documentation risk for traceability findings. For each \
finding, given the affected documentation element and the code change that produced it, judge \
how likely the documentation is now out of date and how severe that would be. Respond with JSON \
only: {\"scores\": [{\"likelihood\", \"severity\", \"reasoning\"}]}, exactly one entry per \
finding, in the given order. likelihood must be one of: Very Likely, Likely, Possibly, Unlikely. \
severity must be one of: Fundamental, Major, Moderate, Minor, Trivial, None.";

/// Scores every finding with a single LLM call, preserving input order
/// (spec §4.10: "output preserves the input length and order"). A parsed
/// response whose length doesn't match is rejected outright rather than
/// zipped partially — Core C propagation policy (§7) treats any such
/// failure as "no recommendations this run", never a partial emission.
#[instrument(skip_all, fields(findings = findings.len()))]
pub async fn score_findings(
    gateway: &LlmGateway,
    findings: Vec<Finding>,
) -> Result<Vec<Finding>, ImpactTraceError> {
    if findings.is_empty() {
        return Ok(findings);
    }

    let listing: Vec<serde_json::Value> = findings
        .iter()
        .map(|f| {
            serde_json::json!({
                "status": f.status,
                "path_type": f.path_type,
                "changed_file": f.changed_file,
                "affected_node": f.affected_node,
                "source_change_set": f.source_change_set,
            })
        })
        .collect();
    let listing_json = serde_json::to_string(&listing).unwrap_or_default();

    let prompt = format!("Findings:\n{listing_json}\n\nScore each finding, in the given order.");

    let batch: LlmScoreBatch = gateway
        .generate(&prompt, Some(SYSTEM_PROMPT), TaskType::ImpactScoring)
        .await?;

    if batch.scores.len() != findings.len() {
        return Err(ImpactTraceError::LengthMismatch {
            expected: findings.len(),
            actual: batch.scores.len(),
        });
    }

    Ok(findings
        .into_iter()
        .zip(batch.scores)
        .map(|(mut finding, score)| {
            finding.likelihood = Some(score.likelihood);
            finding.severity = Some(score.severity);
            finding.reasoning = Some(score.reasoning);
            finding
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_findings_short_circuit() {
        let cfg = llm_gateway::LlmModelConfig {
            provider: llm_gateway::LlmProvider::Ollama,
            model: "test".to_string(),
            endpoint: "http://127.0.0.1:1".to_string(),
            timeout_secs: Some(1),
            top_p: None,
            max_tokens: None,
        };
        let gateway = LlmGateway::new(cfg).unwrap();
        let result = score_findings(&gateway, Vec::new()).await.unwrap();
        assert!(result.is_empty());
    }
}
