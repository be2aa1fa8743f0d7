//! Similarity-based candidate pruning (spec §9: "speed up link candidate
//! pruning").

use std::collections::HashSet;

use trace_model::SemanticIndex;

/// Narrows `candidates` to the `k` most similar to `query_id`'s own indexed
/// vector.
///
/// Falls back to returning every candidate, in order, when the index is
/// inactive, has no vector for `query_id`, or `candidates` already fits
/// within `k` — pruning a set that's already small just adds lookups for
/// nothing, and an inactive/missing index means the caller must fall back
/// to full-candidate-set LLM reasoning (spec §9's no-op contract).
pub fn prune_by_similarity<'a, T>(
    index: &SemanticIndex,
    query_id: &str,
    candidates: &'a [T],
    id_of: impl Fn(&T) -> &str,
    k: usize,
) -> Vec<&'a T> {
    if candidates.len() <= k {
        return candidates.iter().collect();
    }

    let Some(query) = index.vector_of(query_id) else {
        return candidates.iter().collect();
    };

    let ranked = index.top_k(query, k);
    if ranked.is_empty() {
        return candidates.iter().collect();
    }

    let keep: HashSet<&str> = ranked.iter().map(|(id, _)| id.as_str()).collect();
    candidates.iter().filter(|c| keep.contains(id_of(c))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use trace_model::CosineIndex;

    #[test]
    fn inactive_index_returns_every_candidate() {
        let candidates = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let kept = prune_by_similarity(&SemanticIndex::Noop, "a", &candidates, |s| s.as_str(), 1);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn active_index_narrows_to_k_nearest_excluding_self() {
        let mut cosine = CosineIndex::new();
        cosine.insert("a", vec![1.0, 0.0]);
        cosine.insert("b", vec![0.9, 0.1]);
        cosine.insert("c", vec![0.0, 1.0]);
        cosine.insert("d", vec![-1.0, 0.0]);
        let index = SemanticIndex::InMemoryCosine(cosine);

        let candidates = vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()];
        let kept = prune_by_similarity(&index, "a", &candidates, |s| s.as_str(), 2);
        let kept_ids: Vec<&str> = kept.iter().map(|s| s.as_str()).collect();

        assert_eq!(kept.len(), 2);
        assert!(kept_ids.contains(&"a"));
        assert!(kept_ids.contains(&"b"));
    }

    #[test]
    fn small_candidate_set_is_returned_unpruned() {
        let mut cosine = CosineIndex::new();
        cosine.insert("a", vec![1.0, 0.0]);
        cosine.insert("b", vec![0.0, 1.0]);
        let index = SemanticIndex::InMemoryCosine(cosine);

        let candidates = vec!["a".to_string(), "b".to_string()];
        let kept = prune_by_similarity(&index, "a", &candidates, |s| s.as_str(), 5);
        assert_eq!(kept.len(), 2);
    }
}
