//! 4W classification vocabulary and per-commit output shapes (spec §4.8).

use serde::{Deserialize, Serialize};

/// What changed about the file (spec §4.8: closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    Addition,
    Deletion,
    Modification,
    Rename,
}

impl ChangeType {
    fn as_str(self) -> &'static str {
        match self {
            ChangeType::Addition => "Addition",
            ChangeType::Deletion => "Deletion",
            ChangeType::Modification => "Modification",
            ChangeType::Rename => "Rename",
        }
    }
}

impl Serialize for ChangeType {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChangeType {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        match raw.as_str() {
            "Addition" => Ok(ChangeType::Addition),
            "Deletion" => Ok(ChangeType::Deletion),
            "Modification" => Ok(ChangeType::Modification),
            "Rename" => Ok(ChangeType::Rename),
            other => Err(serde::de::Error::custom(format!("unknown ChangeType `{other}`"))),
        }
    }
}

/// Where the change lands (spec §4.8). Unknown strings round-trip through
/// `Other` since the LLM is prompted with, but not mechanically restricted
/// to, this vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeScope {
    FunctionMethod,
    ClassInterface,
    /// Serializes as the original source's fuller label
    /// `"Module/Package/Namespace"`; spec.md's table abbreviates this to
    /// `"Module/Package"`.
    ModulePackage,
    File,
    ApiContract,
    Configuration,
    Dependencies,
    BuildScripts,
    Infrastructure,
    TestCode,
    Documentation,
    CrossCutting,
    Other(String),
}

impl ChangeScope {
    fn as_str(&self) -> &str {
        match self {
            ChangeScope::FunctionMethod => "Function/Method",
            ChangeScope::ClassInterface => "Class/Interface/Struct/Type",
            ChangeScope::ModulePackage => "Module/Package/Namespace",
            ChangeScope::File => "File",
            ChangeScope::ApiContract => "API Contract",
            ChangeScope::Configuration => "Configuration",
            ChangeScope::Dependencies => "Dependencies",
            ChangeScope::BuildScripts => "Build Scripts",
            ChangeScope::Infrastructure => "Infrastructure Code",
            ChangeScope::TestCode => "Test Code",
            ChangeScope::Documentation => "Documentation",
            ChangeScope::CrossCutting => "Cross-cutting Concerns",
            ChangeScope::Other(s) => s,
        }
    }
}

impl From<&str> for ChangeScope {
    fn from(s: &str) -> Self {
        match s {
            "Function/Method" => ChangeScope::FunctionMethod,
            "Class/Interface/Struct/Type" => ChangeScope::ClassInterface,
            "Module/Package/Namespace" | "Module/Package" => ChangeScope::ModulePackage,
            "File" => ChangeScope::File,
            "API Contract" => ChangeScope::ApiContract,
            "Configuration" => ChangeScope::Configuration,
            "Dependencies" => ChangeScope::Dependencies,
            "Build Scripts" => ChangeScope::BuildScripts,
            "Infrastructure Code" | "Infrastructure" => ChangeScope::Infrastructure,
            "Test Code" => ChangeScope::TestCode,
            "Documentation" => ChangeScope::Documentation,
            "Cross-cutting Concerns" | "Cross-cutting" => ChangeScope::CrossCutting,
            other => ChangeScope::Other(other.to_string()),
        }
    }
}

impl Serialize for ChangeScope {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChangeScope {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(ChangeScope::from(String::deserialize(d)?.as_str()))
    }
}

/// Why the change was made: the full taxonomy from the original agent's
/// `ChangeNature` enum (SPEC_FULL §3), open-ended via `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeNature {
    NewFeature,
    FeatureEnhancement,
    BugFix,
    SecurityFix,
    Refactoring,
    PerformanceOptimization,
    CodeStyle,
    TechDebtReduction,
    ReadabilityImprovement,
    ErrorHandlingImprovement,
    DependencyManagement,
    BuildProcessImprovement,
    ToolingConfiguration,
    ApiChange,
    ExternalSystemIntegration,
    DocumentationUpdate,
    UiUxAdjustment,
    StaticContentUpdate,
    CodeDeprecationRemoval,
    Revert,
    MergeConflictResolution,
    LicenseUpdate,
    Experimental,
    Chore,
    Other(String),
}

impl ChangeNature {
    fn as_str(&self) -> &str {
        match self {
            ChangeNature::NewFeature => "New Feature",
            ChangeNature::FeatureEnhancement => "Feature Enhancement",
            ChangeNature::BugFix => "Bug Fix",
            ChangeNature::SecurityFix => "Security Fix",
            ChangeNature::Refactoring => "Refactoring",
            ChangeNature::PerformanceOptimization => "Performance Optimization",
            ChangeNature::CodeStyle => "Code Style/Formatting",
            ChangeNature::TechDebtReduction => "Technical Debt Reduction",
            ChangeNature::ReadabilityImprovement => "Readability Improvement",
            ChangeNature::ErrorHandlingImprovement => "Error Handling Improvement",
            ChangeNature::DependencyManagement => "Dependency Management",
            ChangeNature::BuildProcessImprovement => "Build Process Improvement",
            ChangeNature::ToolingConfiguration => "Tooling Configuration",
            ChangeNature::ApiChange => "API Change",
            ChangeNature::ExternalSystemIntegration => "External System Integration",
            ChangeNature::DocumentationUpdate => "Documentation Update",
            ChangeNature::UiUxAdjustment => "UI/UX Adjustment",
            ChangeNature::StaticContentUpdate => "Static Content Update",
            ChangeNature::CodeDeprecationRemoval => "Code Deprecation/Removal",
            ChangeNature::Revert => "Revert",
            ChangeNature::MergeConflictResolution => "Merge Conflict Resolution",
            ChangeNature::LicenseUpdate => "License Update",
            ChangeNature::Experimental => "Experimental",
            ChangeNature::Chore => "Chore",
            ChangeNature::Other(s) => s,
        }
    }
}

impl From<&str> for ChangeNature {
    fn from(s: &str) -> Self {
        match s {
            "New Feature" => ChangeNature::NewFeature,
            "Feature Enhancement" => ChangeNature::FeatureEnhancement,
            "Bug Fix" => ChangeNature::BugFix,
            "Security Fix" => ChangeNature::SecurityFix,
            "Refactoring" => ChangeNature::Refactoring,
            "Performance Optimization" => ChangeNature::PerformanceOptimization,
            "Code Style/Formatting" => ChangeNature::CodeStyle,
            "Technical Debt Reduction" => ChangeNature::TechDebtReduction,
            "Readability Improvement" => ChangeNature::ReadabilityImprovement,
            "Error Handling Improvement" => ChangeNature::ErrorHandlingImprovement,
            "Dependency Management" => ChangeNature::DependencyManagement,
            "Build Process Improvement" => ChangeNature::BuildProcessImprovement,
            "Tooling Configuration" => ChangeNature::ToolingConfiguration,
            "API Change" => ChangeNature::ApiChange,
            "External System Integration" => ChangeNature::ExternalSystemIntegration,
            "Documentation Update" => ChangeNature::DocumentationUpdate,
            "UI/UX Adjustment" => ChangeNature::UiUxAdjustment,
            "Static Content Update" => ChangeNature::StaticContentUpdate,
            "Code Deprecation/Removal" => ChangeNature::CodeDeprecationRemoval,
            "Revert" => ChangeNature::Revert,
            "Merge Conflict Resolution" => ChangeNature::MergeConflictResolution,
            "License Update" => ChangeNature::LicenseUpdate,
            "Experimental" => ChangeNature::Experimental,
            "Chore" => ChangeNature::Chore,
            other => ChangeNature::Other(other.to_string()),
        }
    }
}

impl Serialize for ChangeNature {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChangeNature {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(ChangeNature::from(String::deserialize(d)?.as_str()))
    }
}

/// Bucketed magnitude of a change, assigned programmatically from
/// added+deleted line counts (see [`crate::volume::bucket_volume`]), never
/// by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeVolume {
    Trivial,
    Small,
    Medium,
    Large,
    VeryLarge,
}

impl ChangeVolume {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeVolume::Trivial => "Trivial",
            ChangeVolume::Small => "Small",
            ChangeVolume::Medium => "Medium",
            ChangeVolume::Large => "Large",
            ChangeVolume::VeryLarge => "Very Large",
        }
    }
}

impl Serialize for ChangeVolume {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChangeVolume {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        match raw.as_str() {
            "Trivial" => Ok(ChangeVolume::Trivial),
            "Small" => Ok(ChangeVolume::Small),
            "Medium" => Ok(ChangeVolume::Medium),
            "Large" => Ok(ChangeVolume::Large),
            "Very Large" => Ok(ChangeVolume::VeryLarge),
            other => Err(serde::de::Error::custom(format!("unknown ChangeVolume `{other}`"))),
        }
    }
}

/// What a VCS diff reports happened to the file, independent of any
/// semantic judgment — the caller already knows this from the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffStatus {
    Added,
    Deleted,
    Modified,
    Renamed,
}

impl From<DiffStatus> for ChangeType {
    fn from(status: DiffStatus) -> Self {
        match status {
            DiffStatus::Added => ChangeType::Addition,
            DiffStatus::Deleted => ChangeType::Deletion,
            DiffStatus::Modified => ChangeType::Modification,
            DiffStatus::Renamed => ChangeType::Rename,
        }
    }
}

/// One changed file's diff, the unit classification operates over.
#[derive(Debug, Clone, PartialEq)]
pub struct FileDiff {
    pub file_path: String,
    pub status: DiffStatus,
    pub patch: String,
    pub added_lines: u32,
    pub deleted_lines: u32,
}

/// One commit's raw input to classification.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInput {
    pub commit_hash: String,
    pub commit_message: String,
    pub diffs: Vec<FileDiff>,
}

/// A single file's 4W classification within one commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeChangeClassification {
    pub file: String,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub scope: ChangeScope,
    pub nature: ChangeNature,
    pub volume: ChangeVolume,
    pub reasoning: String,
}

/// One commit's classified changes (spec §4.8: `{commit_hash,
/// commit_message, classifications:[...]}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitClassification {
    pub commit_hash: String,
    pub commit_message: String,
    pub classifications: Vec<CodeChangeClassification>,
}

/// Raw shape the model is asked to produce: `nature`/`scope`/`reasoning`
/// only, since `file`/`type`/`volume` are known facts the caller already
/// has from the diff and must not be left to the model to restate.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LlmClassification {
    pub file: String,
    pub scope: ChangeScope,
    pub nature: ChangeNature,
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct LlmClassificationBatch {
    pub classifications: Vec<LlmClassification>,
}
