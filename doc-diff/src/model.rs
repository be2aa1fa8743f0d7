//! Pass 1/Pass 2 data shapes (spec §4.6).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Status of a changed file as reported by the commit diff feeding Core B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChangeStatus {
    Added,
    Modified,
    Deleted,
}

/// The change kind a candidate or reconciled element carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Addition,
    Modification,
    Deletion,
}

/// One candidate change as proposed by pass 1, before reconciliation
/// against ground truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateChange {
    pub reference_id: String,
    pub element_type: String,
    pub full_data: serde_json::Value,
    pub detected_change_type: ChangeKind,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateChanges {
    pub candidates: Vec<CandidateChange>,
}

/// One field-level delta within a `modified` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDelta {
    pub from: serde_json::Value,
    pub to: serde_json::Value,
}

/// A reconciled modification: only the fields that actually changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifiedElement {
    pub reference_id: String,
    pub element_type: String,
    pub changes: HashMap<String, FieldDelta>,
}

/// Pass 2's final, reconciled output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub added: Vec<CandidateChange>,
    pub modified: Vec<ModifiedElement>,
    /// `reference_id`s of deleted elements.
    pub deleted: Vec<String>,
}
