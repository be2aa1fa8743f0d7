//! Traceability status, finding, and scoring vocabulary (spec §4.10).

use serde::{Deserialize, Serialize};
use trace_model::NodeKind;

/// Why a code-change/map mismatch is flagged (glossary: "Anomaly").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// A newly added file already has an incoming D->C edge.
    AdditionMapped,
    /// A deleted file had no mapped component to begin with.
    DeletionUnmapped,
    /// A modified file has no mapped component.
    ModificationUnmapped,
    /// A renamed file has no mapped component.
    RenameUnmapped,
}

/// One classification's traceability status (spec §4.10 step 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "anomaly_type", rename_all = "snake_case")]
pub enum TraceabilityStatus {
    /// Mapped component, code modified: the mapped docs may be stale.
    Modification,
    /// Mapped component was deleted: the mapped docs now reference nothing.
    Outdated,
    /// Mapped component was renamed: the mapped docs cite a dead path.
    Rename,
    /// Unmapped addition: new code with no documentation yet.
    Gap,
    Anomaly(AnomalyKind),
}

impl TraceabilityStatus {
    /// Whether this status triggers the graph walk (spec §4.10 step 2);
    /// `Gap`/`Anomaly` skip straight to the merge step instead.
    pub fn is_traced(self) -> bool {
        matches!(
            self,
            TraceabilityStatus::Modification | TraceabilityStatus::Outdated | TraceabilityStatus::Rename
        )
    }
}

/// Direct (one hop from the changed component) vs indirect (two hops).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PathType {
    Direct,
    Indirect,
}

/// How likely the affected doc node is actually out of date (spec §4.10
/// step 4). Closed vocabulary: an unrecognized value must fail parsing so
/// the whole scoring batch is retried, never silently coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Likelihood {
    VeryLikely,
    Likely,
    Possibly,
    Unlikely,
}

impl Likelihood {
    fn as_str(self) -> &'static str {
        match self {
            Likelihood::VeryLikely => "Very Likely",
            Likelihood::Likely => "Likely",
            Likelihood::Possibly => "Possibly",
            Likelihood::Unlikely => "Unlikely",
        }
    }
}

impl Serialize for Likelihood {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Likelihood {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        match raw.as_str() {
            "Very Likely" => Ok(Likelihood::VeryLikely),
            "Likely" => Ok(Likelihood::Likely),
            "Possibly" => Ok(Likelihood::Possibly),
            "Unlikely" => Ok(Likelihood::Unlikely),
            other => Err(serde::de::Error::custom(format!("unknown Likelihood `{other}`"))),
        }
    }
}

/// How severe the impact would be if the doc node is indeed out of date.
/// Closed vocabulary, same unknown-value-fails-parsing contract as
/// [`Likelihood`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    NoneSeverity,
    Trivial,
    Minor,
    Moderate,
    Major,
    Fundamental,
}

impl Severity {
    fn as_str(self) -> &'static str {
        match self {
            Severity::NoneSeverity => "None",
            Severity::Trivial => "Trivial",
            Severity::Minor => "Minor",
            Severity::Moderate => "Moderate",
            Severity::Major => "Major",
            Severity::Fundamental => "Fundamental",
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        match raw.as_str() {
            "None" => Ok(Severity::NoneSeverity),
            "Trivial" => Ok(Severity::Trivial),
            "Minor" => Ok(Severity::Minor),
            "Moderate" => Ok(Severity::Moderate),
            "Major" => Ok(Severity::Major),
            "Fundamental" => Ok(Severity::Fundamental),
            other => Err(serde::de::Error::custom(format!("unknown Severity `{other}`"))),
        }
    }
}

/// The doc node a finding is anchored to, carrying enough of its identity
/// for downstream prompts/recommendations without re-querying the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedNode {
    pub id: String,
    pub kind: NodeKind,
    pub reference_id: String,
    pub name: String,
    pub file_path: String,
}

/// One (changed file, affected doc node) pair awaiting scoring (spec
/// §4.10 / glossary: "Finding").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub status: TraceabilityStatus,
    /// `None` for `Gap`/`Anomaly` findings, which never reach the walk.
    pub path_type: Option<PathType>,
    pub changed_file: String,
    /// `None` for `Gap`/`Anomaly` findings with no mapped doc node to cite.
    pub affected_node: Option<AffectedNode>,
    pub source_change_set: String,
    pub likelihood: Option<Likelihood>,
    pub severity: Option<Severity>,
    pub reasoning: Option<String>,
}

/// Raw per-finding score the model returns, matched back onto `Finding`s
/// purely by position (spec §4.10: "output preserves the input length and
/// order").
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LlmScore {
    pub likelihood: Likelihood,
    pub severity: Severity,
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct LlmScoreBatch {
    pub scores: Vec<LlmScore>,
}
