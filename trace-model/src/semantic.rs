//! Optional semantic-similarity accelerator used by `link-classify`/`relink`
//! to pre-filter candidate pairs before spending LLM calls on them.
//!
//! Dispatched through an enum rather than a trait object: the teacher pack
//! has no `async-trait` anywhere in its dependency stack, so a fixed set of
//! variants matched in a method body is the idiom, not a boxed trait.

use std::collections::HashMap;

/// A semantic similarity index over named vectors.
///
/// `Noop` is the default: no embeddings configured, every query returns no
/// candidates and every pipeline falls back to considering the full
/// candidate set. `InMemoryCosine` is populated by `vector-search` when an
/// embedding provider is configured.
#[derive(Debug, Default)]
pub enum SemanticIndex {
    #[default]
    Noop,
    InMemoryCosine(CosineIndex),
}

impl SemanticIndex {
    /// Replaces the contents of the index with `entries`, dropping whatever
    /// was indexed before. A no-op on the `Noop` variant.
    pub fn reindex(&mut self, entries: Vec<(String, Vec<f32>)>) {
        if let SemanticIndex::InMemoryCosine(idx) = self {
            idx.entries = entries.into_iter().collect();
        }
    }

    /// Top-`k` candidate IDs by cosine similarity to `query`, highest first.
    /// Always empty for `Noop`.
    pub fn top_k(&self, query: &[f32], k: usize) -> Vec<(String, f32)> {
        match self {
            SemanticIndex::Noop => Vec::new(),
            SemanticIndex::InMemoryCosine(idx) => idx.top_k(query, k),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, SemanticIndex::Noop)
    }

    /// The stored vector for `id`, if the index is active and holds one.
    /// Lets a caller use one indexed entry's own embedding as the query for
    /// `top_k` (e.g. "what else is this design element similar to").
    pub fn vector_of(&self, id: &str) -> Option<&[f32]> {
        match self {
            SemanticIndex::Noop => None,
            SemanticIndex::InMemoryCosine(idx) => idx.get(id),
        }
    }
}

/// In-process cosine-similarity index. Deliberately not backed by an
/// external vector database (see DESIGN.md): the candidate sets here are
/// bounded by one repository's document/code population, so a linear scan
/// over in-memory f32 vectors is both simpler and fast enough.
#[derive(Debug, Default)]
pub struct CosineIndex {
    entries: HashMap<String, Vec<f32>>,
}

impl CosineIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, vector: Vec<f32>) {
        self.entries.insert(id.into(), vector);
    }

    pub fn get(&self, id: &str) -> Option<&[f32]> {
        self.entries.get(id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_k(&self, query: &[f32], k: usize) -> Vec<(String, f32)> {
        let mut scored: Vec<(String, f32)> = self
            .entries
            .iter()
            .filter_map(|(id, v)| cosine_similarity(query, v).map(|s| (id.clone(), s)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(k);
        scored
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }
    Some(dot / (norm_a * norm_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_returns_no_candidates() {
        let idx = SemanticIndex::Noop;
        assert!(idx.top_k(&[1.0, 0.0], 5).is_empty());
        assert!(!idx.is_active());
    }

    #[test]
    fn cosine_index_ranks_identical_vector_first() {
        let mut cosine = CosineIndex::new();
        cosine.insert("DE-a", vec![1.0, 0.0, 0.0]);
        cosine.insert("DE-b", vec![0.0, 1.0, 0.0]);
        cosine.insert("DE-c", vec![0.9, 0.1, 0.0]);

        let idx = SemanticIndex::InMemoryCosine(cosine);
        let hits = idx.top_k(&[1.0, 0.0, 0.0], 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].0, "DE-a");
    }

    #[test]
    fn vector_of_looks_up_a_stored_entry() {
        let mut cosine = CosineIndex::new();
        cosine.insert("DE-a", vec![1.0, 0.0]);
        let idx = SemanticIndex::InMemoryCosine(cosine);
        assert_eq!(idx.vector_of("DE-a"), Some(&[1.0, 0.0][..]));
        assert_eq!(idx.vector_of("DE-missing"), None);
        assert_eq!(SemanticIndex::Noop.vector_of("DE-a"), None);
    }
}
