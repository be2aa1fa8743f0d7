//! Vector-search-assisted initial link generation for `baseline-create`.
//!
//! Mirrors `relink::batch`'s chunk-and-retry-once shape exactly, but narrows
//! each batch's `all_X` context down to its nearest neighbors first via
//! `vector-search::prune_by_similarity` before calling into
//! `link-classify`'s `*_candidates` entry points directly. A fresh baseline
//! has no prior edges to seed batching against, so every element is a
//! candidate against the full population — pruning keeps that population
//! bounded for repositories where it would otherwise blow past the
//! gateway's context budget.
//!
//! Kept separate from `relink::batch` rather than grafted into it: that
//! pipeline is already exercised by `baseline-update` and stays untouched.

use futures::stream::{self, StreamExt};
use tracing::warn;

use doc_extract::MatrixRow;
use link_classify::ProposedEdge;
use llm_gateway::LlmGateway;
use relink::batch::BatchStats;
use trace_model::semantic::SemanticIndex;
use trace_model::{CodeComponent, DesignElement, Requirement};

const BATCH_SIZE: usize = 10;
/// Neighbors kept per candidate when narrowing a batch's population context.
const NEIGHBORHOOD: usize = 25;

fn chunk<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    items.chunks(size.max(1)).map(|c| c.to_vec()).collect()
}

/// Narrows `population` to the union of each `query_ids` member's nearest
/// neighbors in `population`. Falls back to the full population unchanged
/// whenever the index has nothing indexed for a query (spec §9: vector
/// search is an accelerator, never a correctness gate).
///
/// Queries and population may come from different node kinds (a batch of
/// candidate requirements narrowing a design-element population, say) — the
/// index is one shared embedding space across reference_ids and code
/// paths, so cross-kind nearest-neighbor lookups are meaningful.
fn narrow<T: Clone>(index: &SemanticIndex, query_ids: &[&str], population: &[T], id_of: impl Fn(&T) -> &str) -> Vec<T> {
    if !index.is_active() {
        return population.to_vec();
    }
    let mut keep: std::collections::HashSet<String> = std::collections::HashSet::new();
    for query_id in query_ids {
        for kept in vector_search::prune_by_similarity(index, query_id, population, &id_of, NEIGHBORHOOD) {
            keep.insert(id_of(kept).to_string());
        }
    }
    if keep.is_empty() {
        return population.to_vec();
    }
    population.iter().filter(|item| keep.contains(id_of(item))).cloned().collect()
}

pub async fn run_dd_batches(
    gateway: &LlmGateway,
    index: &SemanticIndex,
    candidates: &[DesignElement],
    all_design_elements: &[DesignElement],
    concurrency: usize,
) -> (Vec<ProposedEdge>, BatchStats) {
    let batches = chunk(candidates, BATCH_SIZE);
    let mut stats = BatchStats::default();

    let results = stream::iter(batches.into_iter().enumerate())
        .map(|(i, batch)| async move {
            let query_ids: Vec<&str> = batch.iter().map(|d| d.reference_id.as_str()).collect();
            let population = narrow(index, &query_ids, all_design_elements, |d| d.reference_id.as_str());
            let mut attempt_stats = BatchStats { attempted: 1, failed: 0 };
            let call = || link_classify::classify_dd_candidates(gateway, &batch, &population);
            match call().await {
                Ok(edges) => (edges, attempt_stats),
                Err(first_err) => {
                    warn!(batch = i, error = %first_err, "D->D batch failed, retrying once");
                    match call().await {
                        Ok(edges) => (edges, attempt_stats),
                        Err(err) => {
                            warn!(batch = i, error = %err, "D->D batch failed twice, skipping");
                            attempt_stats.failed = 1;
                            (Vec::new(), attempt_stats)
                        }
                    }
                }
            }
        })
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    let mut edges = Vec::new();
    for (batch_edges, batch_stats) in results {
        edges.extend(batch_edges);
        stats.attempted += batch_stats.attempted;
        stats.failed += batch_stats.failed;
    }
    (edges, stats)
}

#[allow(clippy::too_many_arguments)]
pub async fn run_rd_batches(
    gateway: &LlmGateway,
    index: &SemanticIndex,
    candidate_requirements: &[Requirement],
    candidate_design_elements: &[DesignElement],
    all_requirements: &[Requirement],
    all_design_elements: &[DesignElement],
    sdd_content: &str,
    concurrency: usize,
) -> (Vec<ProposedEdge>, BatchStats) {
    let mut combined: Vec<(Option<Requirement>, Option<DesignElement>)> = candidate_requirements
        .iter()
        .cloned()
        .map(|r| (Some(r), None))
        .collect();
    combined.extend(candidate_design_elements.iter().cloned().map(|d| (None, Some(d))));

    let batches = chunk(&combined, BATCH_SIZE);
    let mut stats = BatchStats::default();

    let results = stream::iter(batches.into_iter().enumerate())
        .map(|(i, batch)| async move {
            let batch_requirements: Vec<Requirement> = batch.iter().filter_map(|(r, _)| r.clone()).collect();
            let batch_elements: Vec<DesignElement> = batch.iter().filter_map(|(_, d)| d.clone()).collect();

            let query_ids: Vec<&str> = batch_requirements
                .iter()
                .map(|r| r.reference_id.as_str())
                .chain(batch_elements.iter().map(|d| d.reference_id.as_str()))
                .collect();
            let requirement_population = narrow(index, &query_ids, all_requirements, |r| r.reference_id.as_str());
            let element_population = narrow(index, &query_ids, all_design_elements, |d| d.reference_id.as_str());

            let mut attempt_stats = BatchStats { attempted: 1, failed: 0 };
            let call = || {
                link_classify::classify_rd_candidates(
                    gateway,
                    &batch_requirements,
                    &batch_elements,
                    &requirement_population,
                    &element_population,
                    sdd_content,
                )
            };
            match call().await {
                Ok(edges) => (edges, attempt_stats),
                Err(first_err) => {
                    warn!(batch = i, error = %first_err, "R->D batch failed, retrying once");
                    match call().await {
                        Ok(edges) => (edges, attempt_stats),
                        Err(err) => {
                            warn!(batch = i, error = %err, "R->D batch failed twice, skipping");
                            attempt_stats.failed = 1;
                            (Vec::new(), attempt_stats)
                        }
                    }
                }
            }
        })
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    let mut edges = Vec::new();
    for (batch_edges, batch_stats) in results {
        edges.extend(batch_edges);
        stats.attempted += batch_stats.attempted;
        stats.failed += batch_stats.failed;
    }
    (edges, stats)
}

pub async fn run_dc_batches(
    gateway: &LlmGateway,
    index: &SemanticIndex,
    candidates: &[DesignElement],
    all_code_components: &[(CodeComponent, String)],
    dd_matrix: &[MatrixRow],
    concurrency: usize,
) -> (Vec<ProposedEdge>, BatchStats) {
    let batches = chunk(candidates, BATCH_SIZE);
    let mut stats = BatchStats::default();

    let results = stream::iter(batches.into_iter().enumerate())
        .map(|(i, batch)| async move {
            let query_ids: Vec<&str> = batch.iter().map(|d| d.reference_id.as_str()).collect();
            let population = narrow(index, &query_ids, all_code_components, |(c, _)| c.path.as_str());
            let mut attempt_stats = BatchStats { attempted: 1, failed: 0 };
            let call = || link_classify::classify_dc_candidates(gateway, &batch, &population, dd_matrix);
            match call().await {
                Ok(edges) => (edges, attempt_stats),
                Err(first_err) => {
                    warn!(batch = i, error = %first_err, "D->C batch failed, retrying once");
                    match call().await {
                        Ok(edges) => (edges, attempt_stats),
                        Err(err) => {
                            warn!(batch = i, error = %err, "D->C batch failed twice, skipping");
                            attempt_stats.failed = 1;
                            (Vec::new(), attempt_stats)
                        }
                    }
                }
            }
        })
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    let mut edges = Vec::new();
    for (batch_edges, batch_stats) in results {
        edges.extend(batch_edges);
        stats.attempted += batch_stats.attempted;
        stats.failed += batch_stats.failed;
    }
    (edges, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_returns_full_population_when_index_is_inactive() {
        let index = SemanticIndex::default();
        let population = vec![
            DesignElement {
                id: "DE-1".into(),
                reference_id: "DE-1".into(),
                name: "a".into(),
                description: "".into(),
                kind: trace_model::DesignElementType::Module,
                section: "".into(),
                file_path: "sdd.md".into(),
            },
            DesignElement {
                id: "DE-2".into(),
                reference_id: "DE-2".into(),
                name: "b".into(),
                description: "".into(),
                kind: trace_model::DesignElementType::Module,
                section: "".into(),
                file_path: "sdd.md".into(),
            },
        ];
        let narrowed = narrow(&index, &["DE-1"], &population, |d| d.reference_id.as_str());
        assert_eq!(narrowed.len(), 2);
    }
}
