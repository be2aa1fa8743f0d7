//! Dedup against prior recommendations already posted on the PR (spec
//! §4.11 step 4).
//!
//! §9 leaves "functionally equivalent" undefined. This implementation
//! treats two recommendations as equivalent when they share
//! `(target_document, section, recommendation_type)` — exact-match on the
//! tuple rather than an LLM judgment call, since it's the simpler and more
//! testable of the two options the spec itself names, and a false-negative
//! here (an LLM judging two recommendations "different enough") would
//! double-post near-duplicate suggestions with no way to test for it.

use std::collections::HashSet;

use crate::model::Recommendation;

fn key(r: &Recommendation) -> (String, String, &'static str) {
    (
        r.target_document.clone(),
        r.section.clone(),
        recommendation_type_key(r),
    )
}

fn recommendation_type_key(r: &Recommendation) -> &'static str {
    match r.recommendation_type {
        crate::model::RecommendationType::Update => "UPDATE",
        crate::model::RecommendationType::Create => "CREATE",
        crate::model::RecommendationType::Delete => "DELETE",
        crate::model::RecommendationType::Review => "REVIEW",
    }
}

/// Drops any `new` recommendation whose `(target_document, section,
/// recommendation_type)` already appears in `prior`.
pub fn dedup_against_prior(new: Vec<Recommendation>, prior: &[Recommendation]) -> Vec<Recommendation> {
    let seen: HashSet<(String, String, &'static str)> = prior.iter().map(key).collect();
    new.into_iter().filter(|r| !seen.contains(&key(r))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecommendationType;
    use trace_model::Priority;

    fn rec(doc: &str, section: &str, kind: RecommendationType) -> Recommendation {
        Recommendation {
            target_document: doc.to_string(),
            section: section.to_string(),
            recommendation_type: kind,
            priority: Priority::Medium,
            what_to_update: String::new(),
            where_to_update: String::new(),
            why_update_needed: String::new(),
            suggested_content: String::new(),
        }
    }

    #[test]
    fn drops_exact_tuple_match() {
        let prior = vec![rec("docs/sdd.md", "4.1", RecommendationType::Update)];
        let new = vec![
            rec("docs/sdd.md", "4.1", RecommendationType::Update),
            rec("docs/sdd.md", "4.2", RecommendationType::Update),
        ];
        let kept = dedup_against_prior(new, &prior);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].section, "4.2");
    }

    #[test]
    fn different_recommendation_type_is_not_a_duplicate() {
        let prior = vec![rec("docs/sdd.md", "4.1", RecommendationType::Update)];
        let new = vec![rec("docs/sdd.md", "4.1", RecommendationType::Review)];
        assert_eq!(dedup_against_prior(new, &prior).len(), 1);
    }
}
