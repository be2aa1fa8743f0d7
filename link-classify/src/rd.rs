//! R->D classification (spec §4.5 step 2).

use tracing::instrument;
use trace_model::{DesignElement, Requirement};

use doc_extract::MatrixRow;
use llm_gateway::{LlmGateway, TaskType};

use crate::error::LinkClassifyError;
use crate::model::{ProposedEdge, ProposedEdges};

const SYSTEM_PROMPT: &str = "You classify which design elements satisfy or realize which \
requirements. Respond with JSON only: {\"edges\": [{\"source_id\", \"target_id\", \
\"relationship_type\"}]}. source_id is a requirement reference_id, target_id is a design-element \
reference_id. relationship_type must be one of satisfies, realizes. Default to realizes when \
unsure.";

/// Proposes R->D edges, given the requirement and design-element
/// populations, the SDD matrix, and the raw SDD content for context.
#[instrument(skip_all, fields(requirements = requirements.len(), elements = design_elements.len()))]
pub async fn classify_rd(
    gateway: &LlmGateway,
    requirements: &[Requirement],
    design_elements: &[DesignElement],
    matrix: &[MatrixRow],
    sdd_content: &str,
) -> Result<Vec<ProposedEdge>, LinkClassifyError> {
    let requirements_json = serde_json::to_string(
        &requirements
            .iter()
            .map(|r| (r.reference_id.as_str(), r.title.as_str(), r.description.as_str()))
            .collect::<Vec<_>>(),
    )
    .unwrap_or_default();
    let elements_json = serde_json::to_string(
        &design_elements
            .iter()
            .map(|d| (d.reference_id.as_str(), d.name.as_str()))
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

    let preview: String = sdd_content.chars().take(4000).collect();

    let prompt = format!(
        "Requirements (reference_id, title, description):\n{requirements_json}\n\n\
        Design elements (reference_id, name):\n{elements_json}\n\n\
        Existing traceability-matrix rows (source_id, target_id):\n{matrix_json}\n\n\
        SDD content excerpt:\n{preview}\n\n\
        Propose R->D edges."
    );

    let out: ProposedEdges = gateway
        .generate(&prompt, Some(SYSTEM_PROMPT), TaskType::LinkClassification)
        .await?;
    Ok(out.edges)
}

const CANDIDATE_SYSTEM_PROMPT: &str = "You classify which design elements satisfy or realize \
which requirements. You are given a small batch of *new or changed* requirements or design \
elements and the full populations they may link against. Respond with JSON only: {\"edges\": \
[{\"source_id\", \"target_id\", \"relationship_type\"}]}. source_id is a requirement \
reference_id, target_id is a design-element reference_id. relationship_type must be one of \
satisfies, realizes. Default to realizes when unsure.";

/// Proposes R->D edges for one batch of new/changed requirement or
/// design-element candidates against the full post-update populations of
/// both (spec §4.7 step 4).
#[instrument(skip_all, fields(
    requirement_candidates = candidate_requirements.len(),
    element_candidates = candidate_design_elements.len(),
))]
#[allow(clippy::too_many_arguments)]
pub async fn classify_rd_candidates(
    gateway: &LlmGateway,
    candidate_requirements: &[Requirement],
    candidate_design_elements: &[DesignElement],
    all_requirements: &[Requirement],
    all_design_elements: &[DesignElement],
    sdd_content: &str,
) -> Result<Vec<ProposedEdge>, LinkClassifyError> {
    let candidate_requirements_json = serde_json::to_string(
        &candidate_requirements
            .iter()
            .map(|r| (r.reference_id.as_str(), r.title.as_str()))
            .collect::<Vec<_>>(),
    )
    .unwrap_or_default();
    let candidate_elements_json = serde_json::to_string(
        &candidate_design_elements
            .iter()
            .map(|d| (d.reference_id.as_str(), d.name.as_str()))
            .collect::<Vec<_>>(),
    )
    .unwrap_or_default();
    let all_requirements_json = serde_json::to_string(
        &all_requirements
            .iter()
            .map(|r| (r.reference_id.as_str(), r.title.as_str()))
            .collect::<Vec<_>>(),
    )
    .unwrap_or_default();
    let all_elements_json = serde_json::to_string(
        &all_design_elements
            .iter()
            .map(|d| (d.reference_id.as_str(), d.name.as_str()))
            .collect::<Vec<_>>(),
    )
    .unwrap_or_default();
    let preview: String = sdd_content.chars().take(4000).collect();

    let prompt = format!(
        "New or changed requirements (reference_id, title):\n{candidate_requirements_json}\n\n\
        New or changed design elements (reference_id, name):\n{candidate_elements_json}\n\n\
        Full requirement population (reference_id, title):\n{all_requirements_json}\n\n\
        Full design-element population (reference_id, name):\n{all_elements_json}\n\n\
        SDD content excerpt:\n{preview}\n\n\
        Propose R->D edges involving the new/changed candidates."
    );

    let out: ProposedEdges = gateway
        .generate(&prompt, Some(CANDIDATE_SYSTEM_PROMPT), TaskType::LinkClassification)
        .await?;
    Ok(out.edges)
}
