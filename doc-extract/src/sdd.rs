//! E1: SDD extraction (spec §4.4).

use tracing::{info, instrument, warn};
use trace_model::DesignElementType;

use llm_gateway::{LlmGateway, TaskType};

use crate::error::ExtractError;
use crate::markdown::{filename_stem, find_images, split_sections};
use crate::model::{ExtractedDesignElement, MatrixRow, SddExtraction, SddLlmOutput};

const SYSTEM_PROMPT: &str = "You extract structured design elements and traceability-matrix rows \
from a Software Design Document written in Markdown. Respond with JSON only, matching the \
requested shape exactly. Use an explicit identifier (e.g. C01, UC01) verbatim as reference_id \
when the section declares one; otherwise synthesize '<Name>-<Type>' from the nearest heading \
(e.g. 'Book-Class'). Use the full '<number> <title>' heading text for `section`.";

/// Extracts design elements and (unclassified) matrix rows from one SDD
/// file's Markdown.
///
/// Diagrams are not sent to the model: every embedded image is turned into
/// a `Diagram` design element programmatically, and matrix rows whose
/// `target_id` cannot be reconciled against an extracted `reference_id`
/// are dropped (spec §4.4 post-condition).
#[instrument(skip(gateway, text), fields(path = %path))]
pub async fn extract_sdd(
    gateway: &LlmGateway,
    path: &str,
    text: &str,
) -> Result<SddExtraction, ExtractError> {
    if text.trim().is_empty() {
        return Err(ExtractError::InputMissing(path.to_string()));
    }

    let prompt = format!(
        "File: {path}\n\n\
        Return JSON of shape {{\"design_elements\": [{{\"reference_id\", \"name\", \"description\", \
        \"type\", \"section\"}}], \"matrix_rows\": [{{\"source_id\", \"target_id\"}}]}}.\n\n\
        Document:\n{text}"
    );

    let mut llm_out: SddLlmOutput = gateway
        .generate(&prompt, Some(SYSTEM_PROMPT), TaskType::Extraction)
        .await?;

    let diagram_elements = extract_diagram_elements(text);
    llm_out.design_elements.extend(diagram_elements);

    let known_ids: std::collections::HashSet<&str> = llm_out
        .design_elements
        .iter()
        .map(|d| d.reference_id.as_str())
        .collect();

    let total_rows = llm_out.matrix_rows.len();
    let matrix_rows: Vec<MatrixRow> = llm_out
        .matrix_rows
        .into_iter()
        .filter(|row| known_ids.contains(row.target_id.as_str()))
        .collect();

    if matrix_rows.len() != total_rows {
        warn!(
            path,
            dropped = total_rows - matrix_rows.len(),
            "dropped matrix rows with unresolved target_id"
        );
    }

    info!(
        path,
        design_elements = llm_out.design_elements.len(),
        matrix_rows = matrix_rows.len(),
        "SDD extraction complete"
    );

    Ok(SddExtraction {
        design_elements: llm_out.design_elements,
        matrix_rows,
    })
}

/// Builds a `Diagram` design element per embedded image, per section.
fn extract_diagram_elements(text: &str) -> Vec<ExtractedDesignElement> {
    let mut out = Vec::new();
    for section in split_sections(text) {
        for image in find_images(&section.body) {
            let reference_id = if image.alt.trim().is_empty() {
                format!("{} - {}", section.heading, filename_stem(&image.path))
            } else {
                image.alt.clone()
            };
            out.push(ExtractedDesignElement {
                reference_id,
                name: if image.alt.trim().is_empty() {
                    filename_stem(&image.path)
                } else {
                    image.alt.clone()
                },
                description: format!("Diagram embedded at {}", image.path),
                kind: DesignElementType::Diagram,
                section: section.heading.clone(),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagram_without_caption_uses_section_and_stem() {
        let text = "# 3 Architecture\n\n![](diagrams/login-flow.png)\n";
        let elements = extract_diagram_elements(text);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].reference_id, "3 Architecture - login-flow");
        assert_eq!(elements[0].kind, DesignElementType::Diagram);
    }

    #[test]
    fn diagram_with_caption_uses_caption() {
        let text = "# 3 Architecture\n\n![Login Sequence](diagrams/login-flow.png)\n";
        let elements = extract_diagram_elements(text);
        assert_eq!(elements[0].reference_id, "Login Sequence");
    }
}
