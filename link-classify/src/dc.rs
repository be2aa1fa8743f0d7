//! D->C classification (spec §4.5 step 3).

use tracing::instrument;
use trace_model::{CodeComponent, DesignElement};

use doc_extract::MatrixRow;
use llm_gateway::{LlmGateway, TaskType};

use crate::error::LinkClassifyError;
use crate::model::{ProposedEdge, ProposedEdges};

const SYSTEM_PROMPT: &str = "You classify which code components implement or realize which \
design elements. Respond with JSON only: {\"edges\": [{\"source_id\", \"target_id\", \
\"relationship_type\"}]}. source_id is a design-element reference_id, target_id is a code \
component path. relationship_type must be one of implements, realizes. Default to realizes when \
unsure.";

/// Number of leading bytes of each code component's content shown to the
/// model as a preview (spec §4.5: "first 500 bytes").
const PREVIEW_BYTES: usize = 500;

/// Proposes D->C edges, given design elements, a content preview of each
/// code component, and the D->D matrix for context.
#[instrument(skip_all, fields(elements = design_elements.len(), components = code_components.len()))]
pub async fn classify_dc(
    gateway: &LlmGateway,
    design_elements: &[DesignElement],
    code_components: &[(CodeComponent, String)],
    dd_matrix: &[MatrixRow],
) -> Result<Vec<ProposedEdge>, LinkClassifyError> {
    let elements_json = serde_json::to_string(
        &design_elements
            .iter()
            .map(|d| (d.reference_id.as_str(), d.name.as_str(), d.description.as_str()))
            .collect::<Vec<_>>(),
    )
    .unwrap_or_default();

    let components_json = serde_json::to_string(
        &code_components
            .iter()
            .map(|(c, content)| {
                let preview: String = content.chars().take(PREVIEW_BYTES).collect();
                (c.path.as_str(), preview)
            })
            .collect::<Vec<_>>(),
    )
    .unwrap_or_default();

    let matrix_json = serde_json::to_string(
        &dd_matrix
            .iter()
            .map(|m| (m.source_id.as_str(), m.target_id.as_str()))
            .collect::<Vec<_>>(),
    )
    .unwrap_or_default();

    let prompt = format!(
        "Design elements (reference_id, name, description):\n{elements_json}\n\n\
        Code components (path, content preview):\n{components_json}\n\n\
        D->D matrix for context (source_id, target_id):\n{matrix_json}\n\n\
        Propose D->C edges."
    );

    let out: ProposedEdges = gateway
        .generate(&prompt, Some(SYSTEM_PROMPT), TaskType::LinkClassification)
        .await?;
    Ok(out.edges)
}

const CANDIDATE_SYSTEM_PROMPT: &str = "You classify which code components implement or realize \
which design elements. You are given a small batch of *new or changed* design elements and the \
full refreshed code inventory they may link against, plus D->D edges for context. Respond with \
JSON only: {\"edges\": [{\"source_id\", \"target_id\", \"relationship_type\"}]}. source_id is a \
design-element reference_id, target_id is a code component path. relationship_type must be one \
of implements, realizes. Default to realizes when unsure.";

/// Proposes D->C edges for one batch of new/changed design-element
/// candidates against the full refreshed code inventory (spec §4.7 step 5).
#[instrument(skip_all, fields(
    candidates = candidates.len(),
    components = all_code_components.len(),
))]
pub async fn classify_dc_candidates(
    gateway: &LlmGateway,
    candidates: &[DesignElement],
    all_code_components: &[(CodeComponent, String)],
    dd_matrix: &[MatrixRow],
) -> Result<Vec<ProposedEdge>, LinkClassifyError> {
    let candidates_json = serde_json::to_string(
        &candidates
            .iter()
            .map(|d| (d.reference_id.as_str(), d.name.as_str(), d.description.as_str()))
            .collect::<Vec<_>>(),
    )
    .unwrap_or_default();

    let components_json = serde_json::to_string(
        &all_code_components
            .iter()
            .map(|(c, content)| {
                let preview: String = content.chars().take(PREVIEW_BYTES).collect();
                (c.path.as_str(), preview)
            })
            .collect::<Vec<_>>(),
    )
    .unwrap_or_default();

    let matrix_json = serde_json::to_string(
        &dd_matrix
            .iter()
            .map(|m| (m.source_id.as_str(), m.target_id.as_str()))
            .collect::<Vec<_>>(),
    )
    .unwrap_or_default();

    let prompt = format!(
        "New or changed design elements (reference_id, name, description):\n{candidates_json}\n\n\
        Full refreshed code inventory (path, content preview):\n{components_json}\n\n\
        D->D matrix for context (source_id, target_id):\n{matrix_json}\n\n\
        Propose D->C edges involving the new/changed elements."
    );

    let out: ProposedEdges = gateway
        .generate(&prompt, Some(CANDIDATE_SYSTEM_PROMPT), TaskType::LinkClassification)
        .await?;
    Ok(out.edges)
}
