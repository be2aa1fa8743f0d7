//! Optional embedding-backed accelerator for link-candidate pruning.
//!
//! `trace-model::SemanticIndex`/`CosineIndex` hold the index itself; this
//! crate is the thin layer that populates one from a live gateway and uses
//! it to narrow a candidate pool. Nothing here is load-bearing: every
//! caller can substitute `SemanticIndex::Noop` and fall back to reasoning
//! over the full candidate set (spec §9).

pub mod error;
pub mod index;
pub mod prune;

pub use error::VectorSearchError;
pub use index::build_index;
pub use prune::prune_by_similarity;
