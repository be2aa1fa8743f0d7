//! Two-pass change detection: propose, then reconcile against ground truth
//! (spec §4.6).

use tracing::{info, instrument, warn};
use trace_model::Node;

use llm_gateway::{LlmGateway, TaskType};

use crate::error::DocDiffError;
use crate::model::{ChangeKind, Reconciliation};

const PROPOSE_SYSTEM_PROMPT: &str = "You compare the old and new content of a document and \
propose every requirement or design element that looks added, modified, or deleted. Cast a wide \
net: over-proposing is fine, the next step reconciles against ground truth. Respond with JSON \
only, matching the requested shape exactly.";

const RECONCILE_SYSTEM_PROMPT: &str = "You reconcile a list of candidate changes against the \
current ground-truth elements for this file. A candidate whose reference_id already exists in \
ground truth is a modification, even if it was proposed as an addition; a candidate proposed as \
a modification whose reference_id is not in ground truth is an addition instead. Any ground-truth \
reference_id with no corresponding candidate is a deletion. For modifications, report only the \
fields that actually changed, as {\"field\": {\"from\": ..., \"to\": ...}}. element_type must be \
exactly \"requirement\" or \"design_element\"; for \"added\" entries, full_data must contain \
exactly the fields a requirement or design element carries (reference_id, title/name, \
description, type, priority [requirements only], section). Respond with JSON only, matching the \
requested shape exactly.";

/// Detects and reconciles changes to one document between two revisions.
///
/// When `status` is `Deleted`, pass 1 is skipped entirely: the new content
/// is empty by definition, so every ground-truth element for this file is
/// reported deleted without spending an LLM call on it.
#[instrument(skip(gateway, old_content, new_content, ground_truth), fields(path = %file_path))]
pub async fn analyze_file(
    gateway: &LlmGateway,
    file_path: &str,
    old_content: Option<&str>,
    new_content: Option<&str>,
    status: crate::model::FileChangeStatus,
    ground_truth: &[&Node],
) -> Result<Reconciliation, DocDiffError> {
    if status == crate::model::FileChangeStatus::Deleted {
        let deleted: Vec<String> = ground_truth
            .iter()
            .map(|n| n.reference_id().to_string())
            .collect();
        info!(path = %file_path, deleted = deleted.len(), "file deleted, all ground truth retired");
        return Ok(Reconciliation {
            added: Vec::new(),
            modified: Vec::new(),
            deleted,
        });
    }

    let propose_prompt = format!(
        "File: {file_path}\n\n\
        Old content:\n{old}\n\n\
        New content:\n{new}\n\n\
        Return JSON of shape {{\"candidates\": [{{\"reference_id\", \"element_type\", \
        \"full_data\", \"detected_change_type\": \"addition\"|\"modification\"|\"deletion\"}}]}}.",
        old = old_content.unwrap_or(""),
        new = new_content.unwrap_or(""),
    );

    let candidates: crate::model::CandidateChanges = gateway
        .generate(&propose_prompt, Some(PROPOSE_SYSTEM_PROMPT), TaskType::Extraction)
        .await?;

    if candidates.candidates.is_empty() {
        warn!(path = %file_path, "pass 1 proposed no candidates");
    }

    let ground_truth_json: Vec<serde_json::Value> = ground_truth
        .iter()
        .map(|n| serde_json::to_value(n).unwrap_or(serde_json::Value::Null))
        .collect();

    let reconcile_prompt = format!(
        "File: {file_path}\n\n\
        Candidates:\n{candidates}\n\n\
        Current ground truth for this file:\n{ground_truth}\n\n\
        Return JSON of shape {{\"added\": [...], \"modified\": [{{\"reference_id\", \
        \"element_type\", \"changes\"}}], \"deleted\": [\"reference_id\", ...]}}.",
        candidates = serde_json::to_string(&candidates.candidates).unwrap_or_default(),
        ground_truth = serde_json::to_string(&ground_truth_json).unwrap_or_default(),
    );

    let reconciliation: Reconciliation = gateway
        .generate(&reconcile_prompt, Some(RECONCILE_SYSTEM_PROMPT), TaskType::Reconciliation)
        .await?;

    info!(
        path = %file_path,
        added = reconciliation.added.len(),
        modified = reconciliation.modified.len(),
        deleted = reconciliation.deleted.len(),
        "reconciliation complete"
    );

    Ok(reconciliation)
}

/// Reclassifies a candidate's change kind against whether its
/// `reference_id` is already present in ground truth (spec §4.6).
///
/// Exposed separately from [`analyze_file`] so the reclassification rule
/// itself is unit-testable without a gateway.
pub fn reclassify(candidate_kind: ChangeKind, reference_id_in_ground_truth: bool) -> ChangeKind {
    match (candidate_kind, reference_id_in_ground_truth) {
        (ChangeKind::Addition, true) => ChangeKind::Modification,
        (ChangeKind::Modification, false) => ChangeKind::Addition,
        (kind, _) => kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_in_ground_truth_becomes_modification() {
        assert_eq!(
            reclassify(ChangeKind::Addition, true),
            ChangeKind::Modification
        );
    }

    #[test]
    fn modification_not_in_ground_truth_becomes_addition() {
        assert_eq!(
            reclassify(ChangeKind::Modification, false),
            ChangeKind::Addition
        );
    }

    #[test]
    fn deletion_is_left_alone() {
        assert_eq!(reclassify(ChangeKind::Deletion, true), ChangeKind::Deletion);
        assert_eq!(reclassify(ChangeKind::Deletion, false), ChangeKind::Deletion);
    }
}
