//! Core A orchestration: clone at `branch`, extract every SDD/SRS document,
//! scan the code inventory, generate the full initial link set, and persist
//! the first baseline map.

use std::collections::HashSet;

use doc_extract::{DocumentKind, MatrixRow};
use graph_store::GraphStore;
use llm_gateway::LlmGateway;
use tracing::{info, instrument, warn};
use trace_model::semantic::SemanticIndex;
use trace_model::{DesignElement, EdgeKind, IdAllocator, Node, NodeKind, ProcessingStats, Requirement, TraceMap};

use crate::config::Settings;
use crate::error::CliError;
use crate::linking;

fn dd_matrix_from_map(map: &TraceMap) -> Vec<MatrixRow> {
    map.edges
        .iter()
        .filter(|e| e.kind() == Some(EdgeKind::DesignToDesign))
        .filter_map(|e| {
            let source = map.find_node(&e.source_id)?;
            let target = map.find_node(&e.target_id)?;
            Some(MatrixRow {
                source_id: source.reference_id().to_string(),
                target_id: target.reference_id().to_string(),
                relationship_type: e.relationship_type.as_str().to_string(),
            })
        })
        .collect()
}

/// Builds a combined embedding index across every just-extracted
/// requirement, design element, and scanned code component, when an
/// embedding profile is configured (spec §9: an optional accelerator).
async fn build_semantic_index(
    settings: &Settings,
    requirements: &[Requirement],
    design_elements: &[DesignElement],
    code_components: &[(trace_model::CodeComponent, String)],
) -> SemanticIndex {
    let Some(embedding_config) = settings.embedding_config.clone() else {
        return SemanticIndex::Noop;
    };
    let gateway = match LlmGateway::new(embedding_config) {
        Ok(g) => g,
        Err(err) => {
            warn!(error = %err, "failed to construct embedding gateway, skipping semantic index");
            return SemanticIndex::Noop;
        }
    };

    let mut items: Vec<(String, String)> = Vec::new();
    for r in requirements {
        items.push((r.reference_id.clone(), format!("{}\n{}", r.title, r.description)));
    }
    for d in design_elements {
        items.push((d.reference_id.clone(), format!("{}\n{}", d.name, d.description)));
    }
    for (c, content) in code_components {
        let preview: String = content.chars().take(500).collect();
        items.push((c.path.clone(), preview));
    }

    match vector_search::build_index(&gateway, items, settings.concurrency).await {
        Ok(index) => index,
        Err(err) => {
            warn!(error = %err, "embedding index build failed, continuing unpruned");
            SemanticIndex::Noop
        }
    }
}

#[instrument(skip(settings), fields(%repository, %branch))]
pub async fn run(
    settings: &Settings,
    repository: String,
    branch: String,
    force: bool,
) -> Result<ProcessingStats, CliError> {
    let (owner, repo) = repository
        .split_once('/')
        .ok_or_else(|| CliError::InvalidRepository(repository.clone()))?;

    let store = GraphStore::new(settings.store_root.clone());
    if store.exists(&repository, &branch).await? && !force && !settings.force_recreate_env() {
        return Err(CliError::BaselineExists { repository, branch });
    }

    let gateway = LlmGateway::new(settings.gateway_config.clone())?;

    let checkout = crate::gitclone::clone_at(owner, repo, &branch, settings.github_token.as_deref()).await?;
    let head_sha = crate::gitclone::current_commit_sha(&checkout).await.ok();

    let result = run_against_checkout(settings, &gateway, &store, repository, branch, &checkout, head_sha).await;
    crate::gitclone::cleanup(&checkout);
    result
}

async fn run_against_checkout(
    settings: &Settings,
    gateway: &LlmGateway,
    store: &GraphStore,
    repository: String,
    branch: String,
    checkout: &std::path::Path,
    head_sha: Option<String>,
) -> Result<ProcessingStats, CliError> {
    let files = repo_snapshot::snapshot(checkout, settings.scan_timeout).await?;

    let mut map = TraceMap::new(repository.clone(), branch.clone());
    let mut alloc = IdAllocator::new();
    let mut stats = ProcessingStats::new();

    let mut sdd_content = String::new();
    let mut sdd_matrix: Vec<MatrixRow> = Vec::new();

    for file in &files {
        let Some(kind) = doc_extract::classify(&file.path) else {
            continue;
        };
        let Some(content) = &file.content else {
            continue;
        };

        match kind {
            DocumentKind::Sdd => {
                let extraction = doc_extract::extract_sdd(gateway, &file.path, content).await?;
                sdd_content.push_str(content);
                sdd_content.push('\n');
                sdd_matrix.extend(extraction.matrix_rows.clone());
                insert_design_elements(&mut map, &mut alloc, &file.path, extraction.design_elements)?;
            }
            DocumentKind::Srs => {
                let extraction = doc_extract::extract_srs(gateway, &file.path, content, &sdd_matrix).await?;
                insert_requirements(&mut map, &mut alloc, &file.path, extraction.requirements)?;
                insert_design_elements(&mut map, &mut alloc, &file.path, extraction.design_elements)?;
            }
            DocumentKind::Traceability => {
                // No extractor exists for a standalone traceability document;
                // its rows would otherwise duplicate what the SDD/SRS matrix
                // extraction already covers, so it's skipped with a warning
                // rather than silently ignored.
                warn!(path = %file.path, "standalone traceability document found, skipping (unsupported)");
            }
        }
    }

    stats.requirements_processed = map.requirements().count() as u32;
    stats.design_elements_processed = map.design_elements().count() as u32;

    let code_components = relink::inventory::refresh_code_inventory(&mut map, &mut alloc, &files);
    stats.code_components_processed = code_components.len() as u32;

    let all_requirements: Vec<Requirement> = map.requirements().cloned().collect();
    let all_design_elements: Vec<DesignElement> = map.design_elements().cloned().collect();

    let index = build_semantic_index(settings, &all_requirements, &all_design_elements, &code_components).await;

    let (dd_edges, dd_stats) = linking::run_dd_batches(
        gateway,
        &index,
        &all_design_elements,
        &all_design_elements,
        settings.concurrency,
    )
    .await;
    let (rd_edges, rd_stats) = linking::run_rd_batches(
        gateway,
        &index,
        &all_requirements,
        &all_design_elements,
        &all_requirements,
        &all_design_elements,
        &sdd_content,
        settings.concurrency,
    )
    .await;

    let edges_before = map.edges.len();
    link_classify::apply_proposed_edges(&mut map, &mut alloc, EdgeKind::DesignToDesign, dd_edges)?;
    link_classify::apply_proposed_edges(&mut map, &mut alloc, EdgeKind::RequirementToDesign, rd_edges)?;

    let dd_matrix = dd_matrix_from_map(&map);
    let (dc_edges, dc_stats) = linking::run_dc_batches(
        gateway,
        &index,
        &all_design_elements,
        &code_components,
        &dd_matrix,
        settings.concurrency,
    )
    .await;
    link_classify::apply_proposed_edges(&mut map, &mut alloc, EdgeKind::DesignToCode, dc_edges)?;

    stats.edges_created = (map.edges.len() - edges_before) as u32;
    stats.batches_attempted = dd_stats.attempted + rd_stats.attempted + dc_stats.attempted;
    stats.batches_failed = dd_stats.failed + rd_stats.failed + dc_stats.failed;

    if let Some(sha) = head_sha {
        map.set_last_synced_commit_sha(sha);
    }

    store.save(&map).await?;

    info!(
        requirements = stats.requirements_processed,
        design_elements = stats.design_elements_processed,
        code_components = stats.code_components_processed,
        edges_created = stats.edges_created,
        "baseline created"
    );

    Ok(stats)
}

fn insert_requirements(
    map: &mut TraceMap,
    alloc: &mut IdAllocator,
    file_path: &str,
    extracted: Vec<doc_extract::ExtractedRequirement>,
) -> Result<(), CliError> {
    let mut seen: HashSet<String> = HashSet::new();
    for e in extracted {
        if !seen.insert(e.reference_id.clone()) {
            continue;
        }
        let id = alloc.next_doc_node_id(NodeKind::Requirement, file_path);
        map.insert_node(Node::Requirement(Requirement {
            id,
            reference_id: e.reference_id,
            title: e.title,
            description: e.description,
            kind: e.kind,
            priority: e.priority,
            section: e.section,
            file_path: file_path.to_string(),
        }))?;
    }
    Ok(())
}

fn insert_design_elements(
    map: &mut TraceMap,
    alloc: &mut IdAllocator,
    file_path: &str,
    extracted: Vec<doc_extract::ExtractedDesignElement>,
) -> Result<(), CliError> {
    let mut seen: HashSet<String> = HashSet::new();
    for e in extracted {
        if !seen.insert(e.reference_id.clone()) {
            continue;
        }
        let id = alloc.next_doc_node_id(NodeKind::DesignElement, file_path);
        map.insert_node(Node::DesignElement(DesignElement {
            id,
            reference_id: e.reference_id,
            name: e.name,
            description: e.description,
            kind: e.kind,
            section: e.section,
            file_path: file_path.to_string(),
        }))?;
    }
    Ok(())
}

