//! Logical change set vocabulary (spec §4.9).

use change_classify::CodeChangeClassification;
use serde::{Deserialize, Serialize};

/// One classified file change, tagged with the commit it came from so a
/// change set can cite which commits contributed to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedChange {
    pub commit_hash: String,
    pub commit_message: String,
    pub classification: CodeChangeClassification,
}

/// A named cluster of related changes (spec §4.9: `{name, description,
/// changes:[...]}`), mirroring the original source's `LogicalChangeSet`
/// shape: each member change keeps its full 4W classification, since
/// downstream impact tracing (Core C.3) needs `type` to derive
/// traceability status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalChangeSet {
    pub name: String,
    pub description: String,
    pub changes: Vec<ClassifiedChange>,
    pub commit_messages: Vec<String>,
}

/// Name the fallback set used for changes the model's grouping omitted.
pub const UNGROUPED_SET_NAME: &str = "Ungrouped Changes";

/// Raw shape the model is asked to produce: each group names the input
/// indices (into the flattened change list) it claims, nothing else —
/// the reference/description text is regenerated from what the model
/// actually said, never trusted blindly for membership.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LlmGroup {
    pub name: String,
    pub description: String,
    pub indices: Vec<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct LlmGroupingBatch {
    pub groups: Vec<LlmGroup>,
}
