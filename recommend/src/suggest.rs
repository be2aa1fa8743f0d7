//! Per-document recommendation generation (spec §4.11 step 3).

use tracing::instrument;

use llm_gateway::{LlmGateway, TaskType};

use crate::error::RecommendError;
use crate::group::GroupedFindings;
use crate::model::{LlmRecommendationBatch, Recommendation};

const SYSTEM_PROMPT: &str = "You write documentation-update recommendations for one target \
document, given a summary of findings that suggest it may be stale. Respond with JSON only: \
{\"recommendations\": [{\"section\", \"recommendation_type\", \"priority\", \"what_to_update\", \
\"where_to_update\", \"why_update_needed\", \"suggested_content\"}]}. recommendation_type must be \
one of: UPDATE, CREATE, DELETE, REVIEW. priority must be one of: Critical, High, Medium, Low.";

/// Generates recommendations for one document's findings.
#[instrument(skip_all, fields(target_document = %group.summary.target_document, findings = group.findings.len()))]
pub async fn suggest_for_document(
    gateway: &LlmGateway,
    group: &GroupedFindings,
) -> Result<Vec<Recommendation>, RecommendError> {
    let summary_json = serde_json::to_string(&group.summary).unwrap_or_default();
    let findings_json = serde_json::to_string(&group.findings).unwrap_or_default();

    let prompt = format!(
        "Document summary:\n{summary_json}\n\nFindings:\n{findings_json}\n\n\
        Generate the documentation-update recommendations for this document."
    );

    let batch: LlmRecommendationBatch = gateway
        .generate(&prompt, Some(SYSTEM_PROMPT), TaskType::Recommendation)
        .await?;

    Ok(batch
        .recommendations
        .into_iter()
        .map(|r| Recommendation {
            target_document: group.summary.target_document.clone(),
            section: r.section,
            recommendation_type: r.recommendation_type,
            priority: r.priority,
            what_to_update: r.what_to_update,
            where_to_update: r.where_to_update,
            why_update_needed: r.why_update_needed,
            suggested_content: r.suggested_content,
        })
        .collect())
}
