//! E2: SRS extraction, primed by the SDD's matrix rows (spec §4.4).

use tracing::{info, instrument};

use llm_gateway::{LlmGateway, TaskType};

use crate::error::ExtractError;
use crate::model::{MatrixRow, SrsExtraction, SrsLlmOutput};

const SYSTEM_PROMPT: &str = "You extract structured requirements and any additional design \
elements mentioned only in an SRS document written in Markdown. Respond with JSON only, matching \
the requested shape exactly. `type` is Functional or Non-Functional; `priority` is Critical, \
High, Medium, or Low. Use the full '<number> <title>' heading text for `section`.";

/// Extracts requirements (and any SRS-only design elements) from one SRS
/// file's Markdown, primed with the design-element IDs the SDD matrix
/// already references so the model knows which identifiers downstream
/// linking will need to match against.
#[instrument(skip(gateway, text, sdd_matrix), fields(path = %path, primed = sdd_matrix.len()))]
pub async fn extract_srs(
    gateway: &LlmGateway,
    path: &str,
    text: &str,
    sdd_matrix: &[MatrixRow],
) -> Result<SrsExtraction, ExtractError> {
    if text.trim().is_empty() {
        return Err(ExtractError::InputMissing(path.to_string()));
    }

    let primed_ids: Vec<&str> = sdd_matrix.iter().map(|r| r.target_id.as_str()).collect();
    let priming = if primed_ids.is_empty() {
        String::new()
    } else {
        format!(
            "\n\nThe design document already references these design-element identifiers via its \
            traceability matrix: {}. Prefer matching requirement wording to these where applicable.",
            primed_ids.join(", ")
        )
    };

    let prompt = format!(
        "File: {path}\n\n\
        Return JSON of shape {{\"requirements\": [{{\"reference_id\", \"title\", \"description\", \
        \"type\", \"priority\", \"section\"}}], \"design_elements\": [{{\"reference_id\", \"name\", \
        \"description\", \"type\", \"section\"}}]}}.{priming}\n\n\
        Document:\n{text}"
    );

    let llm_out: SrsLlmOutput = gateway
        .generate(&prompt, Some(SYSTEM_PROMPT), TaskType::Extraction)
        .await?;

    info!(
        path,
        requirements = llm_out.requirements.len(),
        design_elements = llm_out.design_elements.len(),
        "SRS extraction complete"
    );

    Ok(SrsExtraction {
        requirements: llm_out.requirements,
        design_elements: llm_out.design_elements,
    })
}
