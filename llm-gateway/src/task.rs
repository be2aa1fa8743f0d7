//! Task identifiers so cost/latency can be attributed per call site
//! (spec §4.3: "tasks carry an identifier so observability can attribute
//! cost").

/// The kind of call being made through the gateway. Each pipeline stage
/// tags its calls with the matching variant; [`TaskType::temperature`]
/// supplies the fixed per-task sampling temperature from spec §4.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskType {
    /// Core A.1/A.2 document extraction (requirements, design elements).
    Extraction,
    /// Core A.2/B.2 R->D, D->D, D->C link proposal and reconciliation.
    LinkClassification,
    /// Cross-pass reconciliation against previously extracted ground truth.
    Reconciliation,
    /// Core C.1 four-W change classification.
    ChangeClassification,
    /// Core C.2 grouping of classified changes into logical sets.
    ChangeGrouping,
    /// Core C.3 finding likelihood/severity scoring.
    ImpactScoring,
    /// Core C.4 recommendation text generation.
    Recommendation,
}

impl TaskType {
    /// Sampling temperature fixed per task per spec §4.3.
    pub fn temperature(self) -> f32 {
        match self {
            TaskType::Extraction => 0.1,
            TaskType::LinkClassification => 0.12,
            TaskType::Reconciliation => 0.0,
            TaskType::ChangeClassification => 0.1,
            TaskType::ChangeGrouping => 0.1,
            TaskType::ImpactScoring => 0.1,
            TaskType::Recommendation => 0.2,
        }
    }

    /// Label used in tracing fields and cost-attribution logs.
    pub fn label(self) -> &'static str {
        match self {
            TaskType::Extraction => "extraction",
            TaskType::LinkClassification => "link_classification",
            TaskType::Reconciliation => "reconciliation",
            TaskType::ChangeClassification => "change_classification",
            TaskType::ChangeGrouping => "change_grouping",
            TaskType::ImpactScoring => "impact_scoring",
            TaskType::Recommendation => "recommendation",
        }
    }
}
