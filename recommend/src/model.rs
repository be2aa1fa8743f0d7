//! Recommendation vocabulary and per-document summary shapes (spec §4.11).

use serde::{Deserialize, Serialize};
use trace_model::Priority;

/// Sentinel target document for findings with no mapped doc node (`Gap`
/// and unmapped `Anomaly` statuses) — these get grouped together rather
/// than attributed to a document they were never linked from.
pub const UNMAPPED_TARGET_DOCUMENT: &str = "(unmapped changes)";

/// Kind of documentation edit being proposed (spec §4.11 step 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationType {
    Update,
    Create,
    Delete,
    Review,
}

impl RecommendationType {
    fn as_str(self) -> &'static str {
        match self {
            RecommendationType::Update => "UPDATE",
            RecommendationType::Create => "CREATE",
            RecommendationType::Delete => "DELETE",
            RecommendationType::Review => "REVIEW",
        }
    }
}

impl Serialize for RecommendationType {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecommendationType {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        match raw.as_str() {
            "UPDATE" => Ok(RecommendationType::Update),
            "CREATE" => Ok(RecommendationType::Create),
            "DELETE" => Ok(RecommendationType::Delete),
            "REVIEW" => Ok(RecommendationType::Review),
            other => Err(serde::de::Error::custom(format!(
                "unknown RecommendationType `{other}`"
            ))),
        }
    }
}

/// One proposed documentation edit (spec §4.11 step 3 field list).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub target_document: String,
    pub section: String,
    pub recommendation_type: RecommendationType,
    pub priority: Priority,
    pub what_to_update: String,
    pub where_to_update: String,
    pub why_update_needed: String,
    pub suggested_content: String,
}

/// Per-document rollup built before suggestion generation (spec §4.11
/// step 2: "counts by priority, affected sections, anomaly instructions").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub target_document: String,
    pub finding_count: usize,
    pub major_or_fundamental_count: usize,
    pub sections_affected: Vec<String>,
    pub anomaly_instructions: Vec<String>,
}

/// Raw shape the model is asked to produce for one target document: plain
/// recommendation fields, minus `target_document` (supplied by the caller,
/// never trusted to the model to restate consistently across a batch).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LlmRecommendation {
    pub section: String,
    pub recommendation_type: RecommendationType,
    pub priority: Priority,
    pub what_to_update: String,
    pub where_to_update: String,
    pub why_update_needed: String,
    #[serde(default)]
    pub suggested_content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct LlmRecommendationBatch {
    pub recommendations: Vec<LlmRecommendation>,
}
