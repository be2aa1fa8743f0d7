//! D->D classification (spec §4.5 step 1).

use tracing::instrument;
use trace_model::DesignElement;

use doc_extract::MatrixRow;
use llm_gateway::{LlmGateway, TaskType};

use crate::error::LinkClassifyError;
use crate::model::{ProposedEdge, ProposedEdges};

const SYSTEM_PROMPT: &str = "You classify relationships between design elements of one software \
design. Respond with JSON only: {\"edges\": [{\"source_id\", \"target_id\", \"relationship_type\"}]}. \
relationship_type must be one of refines, depends_on, realizes. Default to realizes when unsure. \
Add newly-discovered edges beyond the given matrix where the semantics clearly warrant one, but do \
not invent unrelated links.";

/// Proposes D->D edges over every design element, seeded by (but not
/// limited to) the SDD's explicit matrix rows.
#[instrument(skip_all, fields(elements = design_elements.len(), matrix = matrix.len()))]
pub async fn classify_dd(
    gateway: &LlmGateway,
    design_elements: &[DesignElement],
    matrix: &[MatrixRow],
) -> Result<Vec<ProposedEdge>, LinkClassifyError> {
    let elements_json = serde_json::to_string(
        &design_elements
            .iter()
            .map(|d| (d.reference_id.as_str(), d.name.as_str(), d.description.as_str()))
            .collect::<Vec<_>>(),
    )
    .unwrap_or_default();
    let matrix_json = serde_json::to_string(
        &matrix
            .iter()
            .map(|m| (m.source_id.as_str(), m.target_id.as_str()))
            .collect::<Vec<_>>(),
    )
    .unwrap_or_default();

    let prompt = format!(
        "Design elements (reference_id, name, description):\n{elements_json}\n\n\
        Existing traceability-matrix rows (source_id, target_id):\n{matrix_json}\n\n\
        Propose D->D edges."
    );

    let out: ProposedEdges = gateway
        .generate(&prompt, Some(SYSTEM_PROMPT), TaskType::LinkClassification)
        .await?;
    Ok(out.edges)
}

const CANDIDATE_SYSTEM_PROMPT: &str = "You classify relationships between design elements of one \
software design. You are given a small batch of *new or changed* design elements and the full \
population of design elements they may link to. Respond with JSON only: {\"edges\": \
[{\"source_id\", \"target_id\", \"relationship_type\"}]}. Only propose edges where the batch \
elements are the source or target. relationship_type must be one of refines, depends_on, \
realizes. Default to realizes when unsure.";

/// Proposes D->D edges for one batch of candidate (new/changed) design
/// elements against the full, post-update design-element population (spec
/// §4.7 step 4: "each call sees a full set of targets").
#[instrument(skip_all, fields(batch = candidates.len(), population = all_design_elements.len()))]
pub async fn classify_dd_candidates(
    gateway: &LlmGateway,
    candidates: &[DesignElement],
    all_design_elements: &[DesignElement],
) -> Result<Vec<ProposedEdge>, LinkClassifyError> {
    let candidates_json = serde_json::to_string(
        &candidates
            .iter()
            .map(|d| (d.reference_id.as_str(), d.name.as_str(), d.description.as_str()))
            .collect::<Vec<_>>(),
    )
    .unwrap_or_default();
    let population_json = serde_json::to_string(
        &all_design_elements
            .iter()
            .map(|d| (d.reference_id.as_str(), d.name.as_str()))
            .collect::<Vec<_>>(),
    )
    .unwrap_or_default();

    let prompt = format!(
        "New or changed design elements (reference_id, name, description):\n{candidates_json}\n\n\
        Full design-element population (reference_id, name):\n{population_json}\n\n\
        Propose D->D edges involving the new/changed elements."
    );

    let out: ProposedEdges = gateway
        .generate(&prompt, Some(CANDIDATE_SYSTEM_PROMPT), TaskType::LinkClassification)
        .await?;
    Ok(out.edges)
}
