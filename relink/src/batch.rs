//! Bounded parallel batch fan-out for link-generation calls (spec §4.7
//! steps 4/5), grounded on `rag-store::embed_pool::embed_missing`'s
//! `stream::iter(...).map(...).buffer_unordered(concurrency)` shape.
//!
//! Failure isolation per spec §7: a batch's LLM call is retried once, then
//! skipped with a warning; other batches' results are unaffected.

use futures::stream::{self, StreamExt};
use tracing::warn;
use trace_model::{CodeComponent, DesignElement, Requirement};

use doc_extract::MatrixRow;
use link_classify::ProposedEdge;
use llm_gateway::LlmGateway;

/// Batch candidates are grouped into chunks of this size before fan-out
/// (spec §4.7 step 4: "batch candidates (batch size ~10)").
const BATCH_SIZE: usize = 10;

/// Bookkeeping for the per-run `ProcessingStats` (spec §7: "batch
/// successes/failures").
#[derive(Debug, Default, Clone, Copy)]
pub struct BatchStats {
    pub attempted: u32,
    pub failed: u32,
}

impl BatchStats {
    fn merge(&mut self, other: BatchStats) {
        self.attempted += other.attempted;
        self.failed += other.failed;
    }
}

fn chunk<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    items.chunks(size.max(1)).map(|c| c.to_vec()).collect()
}

pub async fn run_dd_batches(
    gateway: &LlmGateway,
    candidates: &[DesignElement],
    all_design_elements: &[DesignElement],
    concurrency: usize,
) -> (Vec<ProposedEdge>, BatchStats) {
    let batches = chunk(candidates, BATCH_SIZE);
    let mut stats = BatchStats::default();

    let results = stream::iter(batches.into_iter().enumerate())
        .map(|(i, batch)| async move {
            let mut attempt_stats = BatchStats { attempted: 1, failed: 0 };
            match link_classify::classify_dd_candidates(gateway, &batch, all_design_elements).await {
                Ok(edges) => (edges, attempt_stats),
                Err(first_err) => {
                    warn!(batch = i, error = %first_err, "D->D batch failed, retrying once");
                    match link_classify::classify_dd_candidates(gateway, &batch, all_design_elements).await {
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
        stats.merge(batch_stats);
    }
    (edges, stats)
}

#[allow(clippy::too_many_arguments)]
pub async fn run_rd_batches(
    gateway: &LlmGateway,
    candidate_requirements: &[Requirement],
    candidate_design_elements: &[DesignElement],
    all_requirements: &[Requirement],
    all_design_elements: &[DesignElement],
    sdd_content: &str,
    concurrency: usize,
) -> (Vec<ProposedEdge>, BatchStats) {
    // Requirements and design elements are batched together as one
    // candidate pool, since R->D edges can originate from either end.
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
            let batch_requirements: Vec<Requirement> =
                batch.iter().filter_map(|(r, _)| r.clone()).collect();
            let batch_elements: Vec<DesignElement> =
                batch.iter().filter_map(|(_, d)| d.clone()).collect();

            let mut attempt_stats = BatchStats { attempted: 1, failed: 0 };
            let call = || {
                link_classify::classify_rd_candidates(
                    gateway,
                    &batch_requirements,
                    &batch_elements,
                    all_requirements,
                    all_design_elements,
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
        stats.merge(batch_stats);
    }
    (edges, stats)
}

pub async fn run_dc_batches(
    gateway: &LlmGateway,
    candidates: &[DesignElement],
    all_code_components: &[(CodeComponent, String)],
    dd_matrix: &[MatrixRow],
    concurrency: usize,
) -> (Vec<ProposedEdge>, BatchStats) {
    let batches = chunk(candidates, BATCH_SIZE);
    let mut stats = BatchStats::default();

    let results = stream::iter(batches.into_iter().enumerate())
        .map(|(i, batch)| async move {
            let mut attempt_stats = BatchStats { attempted: 1, failed: 0 };
            let call = || link_classify::classify_dc_candidates(gateway, &batch, all_code_components, dd_matrix);
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
        stats.merge(batch_stats);
    }
    (edges, stats)
}
