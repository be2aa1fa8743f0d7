//! Orchestrates the full incremental relink run (spec §4.7, steps 1-7).

use std::path::Path;
use std::time::Duration;

use doc_diff::{ground_truth_for_file, FileChangeStatus};
use graph_store::GraphStore;
use llm_gateway::LlmGateway;
use tracing::{info, instrument};
use trace_model::{DesignElement, EdgeKind, ProcessingStats, Requirement, TraceMap};

use crate::batch::{run_dc_batches, run_dd_batches, run_rd_batches};
use crate::doc_apply::apply_reconciliation;
use crate::error::RelinkError;
use crate::inventory::refresh_code_inventory;
use crate::model::{ChangedCodeFile, ChangedDocument};

/// Translates the map's current D->D edges into `MatrixRow`s keyed by
/// `reference_id`, for use as D->C classification context (spec §4.7 step
/// 5: "as auxiliary context the D->D edges created in step 4").
fn dd_matrix_from_map(map: &TraceMap) -> Vec<doc_extract::MatrixRow> {
    map.edges
        .iter()
        .filter(|e| e.kind() == Some(EdgeKind::DesignToDesign))
        .filter_map(|e| {
            let source = map.find_node(&e.source_id)?;
            let target = map.find_node(&e.target_id)?;
            Some(doc_extract::MatrixRow {
                source_id: source.reference_id().to_string(),
                target_id: target.reference_id().to_string(),
                relationship_type: e.relationship_type.as_str().to_string(),
            })
        })
        .collect()
}

/// Runs one incremental relink against the map currently persisted for
/// `(map.repository, map.branch)`, then saves it with optimistic
/// concurrency against the `updated_at` observed at entry.
///
/// `synced_commit_sha`, when given, is stamped onto the map immediately
/// before the final save — never before `observed_updated_at` is captured,
/// since `set_last_synced_commit_sha` itself bumps `updated_at` and doing
/// that first would make the save's own conflict check compare the map
/// against a timestamp it just set, failing every run even with no
/// concurrent writer.
///
/// Step 2 (the code rescan) runs first: if it fails, nothing about `map` is
/// mutated and nothing is written (spec §4.7 closing note: "invalidation
/// must not run if step 2 cannot produce a code inventory").
#[instrument(skip_all, fields(repository = %map.repository, branch = %map.branch))]
pub async fn run(
    gateway: &LlmGateway,
    store: &GraphStore,
    map: &mut TraceMap,
    repo_root: &Path,
    changed_documents: &[ChangedDocument],
    changed_code_files: &[ChangedCodeFile],
    sdd_content: &str,
    scan_timeout: Duration,
    concurrency: usize,
    synced_commit_sha: Option<&str>,
) -> Result<ProcessingStats, RelinkError> {
    let observed_updated_at = map.updated_at;
    let mut stats = ProcessingStats::new();

    let files = repo_snapshot::snapshot(repo_root, scan_timeout).await?;

    let mut alloc = map.allocator();
    let edges_before_invalidate = map.edges.len();

    // Pass 1/2 doc-diff per changed document (deletion is short-circuited
    // inside `analyze_file`).
    let mut candidate_requirements: Vec<Requirement> = Vec::new();
    let mut candidate_design_elements: Vec<DesignElement> = Vec::new();

    for doc in changed_documents {
        let ground_truth = ground_truth_for_file(map, &doc.file_path);
        let reconciliation = doc_diff::analyze_file(
            gateway,
            &doc.file_path,
            doc.old_content.as_deref(),
            doc.new_content.as_deref(),
            doc.status,
            &ground_truth,
        )
        .await?;

        let applied = apply_reconciliation(map, &mut alloc, &doc.file_path, &reconciliation)?;
        candidate_requirements.extend(applied.candidate_requirements);
        candidate_design_elements.extend(applied.candidate_design_elements);
    }

    // Step 1, code half: drop D->C edges for code files that changed but
    // didn't vanish outright (vanished ones cascade via `remove_node` inside
    // the inventory refresh below).
    for changed in changed_code_files {
        if matches!(changed.status, FileChangeStatus::Modified | FileChangeStatus::Deleted) {
            let id = map
                .code_components()
                .find(|c| c.path == changed.path)
                .map(|c| c.id.clone());
            if let Some(id) = id {
                map.remove_edges_touching(&id);
            }
        }
    }

    let edges_removed = (edges_before_invalidate - map.edges.len()) as u32;

    // Step 2: refresh the code inventory from the fresh snapshot.
    let code_components = refresh_code_inventory(map, &mut alloc, &files);
    stats.code_components_processed = code_components.len() as u32;
    stats.requirements_processed = candidate_requirements.len() as u32;
    stats.design_elements_processed = candidate_design_elements.len() as u32;

    // Steps 4/5: batched, bounded-concurrency link generation.
    let all_design_elements: Vec<DesignElement> = map.design_elements().cloned().collect();
    let all_requirements: Vec<Requirement> = map.requirements().cloned().collect();

    let (dd_edges, dd_stats) =
        run_dd_batches(gateway, &candidate_design_elements, &all_design_elements, concurrency).await;
    let (rd_edges, rd_stats) = run_rd_batches(
        gateway,
        &candidate_requirements,
        &candidate_design_elements,
        &all_requirements,
        &all_design_elements,
        sdd_content,
        concurrency,
    )
    .await;

    let edges_before_apply = map.edges.len();
    link_classify::apply_proposed_edges(map, &mut alloc, EdgeKind::DesignToDesign, dd_edges)?;
    link_classify::apply_proposed_edges(map, &mut alloc, EdgeKind::RequirementToDesign, rd_edges)?;

    let dd_matrix = dd_matrix_from_map(map);
    let (dc_edges, dc_stats) =
        run_dc_batches(gateway, &candidate_design_elements, &code_components, &dd_matrix, concurrency).await;
    link_classify::apply_proposed_edges(map, &mut alloc, EdgeKind::DesignToCode, dc_edges)?;

    stats.edges_removed = edges_removed;
    stats.edges_created = (map.edges.len() - edges_before_apply) as u32;
    stats.batches_attempted = dd_stats.attempted + rd_stats.attempted + dc_stats.attempted;
    stats.batches_failed = dd_stats.failed + rd_stats.failed + dc_stats.failed;

    if let Some(sha) = synced_commit_sha {
        map.set_last_synced_commit_sha(sha);
    }

    // Step 7: one atomic save, rejecting if a concurrent writer landed
    // first.
    store.save_if_unchanged(map, observed_updated_at).await?;

    info!(
        edges_created = stats.edges_created,
        edges_removed = stats.edges_removed,
        batches_failed = stats.batches_failed,
        "relink complete"
    );

    Ok(stats)
}
