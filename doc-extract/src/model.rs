//! Extraction output shapes. These are plain data — no surrogate `id` or
//! `file_path` fields, since IDs are assigned by the caller from the
//! monotonic allocator at the merge step (spec §4.4: "both entry points
//! return pure data").

use serde::{Deserialize, Serialize};
use trace_model::{DesignElementType, Priority, RequirementType};

/// One design element as extracted from an SDD (or primed from an SRS).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDesignElement {
    pub reference_id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: DesignElementType,
    pub section: String,
}

/// One requirement as extracted from an SRS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRequirement {
    pub reference_id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: RequirementType,
    #[serde(default)]
    pub priority: Priority,
    pub section: String,
}

/// A traceability-matrix row as written in the document, before
/// classification. `relationship_type` is always `"unclassified"` here —
/// Core A.2 assigns the real type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub source_id: String,
    pub target_id: String,
    #[serde(default = "unclassified")]
    pub relationship_type: String,
}

fn unclassified() -> String {
    "unclassified".to_string()
}

/// E1 output: `{ design_elements, matrix_rows }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SddExtraction {
    pub design_elements: Vec<ExtractedDesignElement>,
    pub matrix_rows: Vec<MatrixRow>,
}

/// E2 output: `{ requirements, design_elements }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SrsExtraction {
    pub requirements: Vec<ExtractedRequirement>,
    pub design_elements: Vec<ExtractedDesignElement>,
}

/// Raw shape the LLM is asked to produce for E1, before diagram elements
/// (which are synthesized programmatically, not by the model) are merged
/// in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SddLlmOutput {
    pub design_elements: Vec<ExtractedDesignElement>,
    pub matrix_rows: Vec<MatrixRow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SrsLlmOutput {
    pub requirements: Vec<ExtractedRequirement>,
    pub design_elements: Vec<ExtractedDesignElement>,
}
