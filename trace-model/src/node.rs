//! Node kinds: [`Requirement`] (SRS), [`DesignElement`] (SDD), [`CodeComponent`] (repo scan).

use serde::{Deserialize, Serialize};

/// Discriminant for the three vertex kinds in the traceability multigraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Requirement,
    DesignElement,
    CodeComponent,
}

impl NodeKind {
    /// Stable surrogate-ID prefix for this kind (`REQ`, `DE`, `CC`).
    pub fn id_prefix(self) -> &'static str {
        match self {
            NodeKind::Requirement => "REQ",
            NodeKind::DesignElement => "DE",
            NodeKind::CodeComponent => "CC",
        }
    }

    /// Recovers the node kind from a surrogate ID's prefix.
    ///
    /// Returns `None` if the ID does not start with a recognized prefix
    /// followed by `-`.
    pub fn from_id(id: &str) -> Option<NodeKind> {
        if let Some(rest) = id.strip_prefix("REQ-") {
            let _ = rest;
            Some(NodeKind::Requirement)
        } else if let Some(rest) = id.strip_prefix("DE-") {
            let _ = rest;
            Some(NodeKind::DesignElement)
        } else if id.starts_with("CC-") {
            Some(NodeKind::CodeComponent)
        } else {
            None
        }
    }
}

/// Requirement type, per spec's `Functional/Non-Functional/...` vocabulary.
///
/// Unknown strings round-trip through `Other` rather than being rejected —
/// the LLM extractor is not a closed classifier for this field. Serializes
/// as its plain string form rather than an externally-tagged enum, so that
/// `Other("Safety")` round-trips to `"Safety"`, not `{"other": "Safety"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementType {
    Functional,
    NonFunctional,
    Other(String),
}

impl RequirementType {
    fn as_str(&self) -> &str {
        match self {
            RequirementType::Functional => "Functional",
            RequirementType::NonFunctional => "Non-Functional",
            RequirementType::Other(s) => s,
        }
    }
}

impl From<&str> for RequirementType {
    fn from(s: &str) -> Self {
        match s {
            "Functional" => RequirementType::Functional,
            "Non-Functional" | "NonFunctional" => RequirementType::NonFunctional,
            other => RequirementType::Other(other.to_string()),
        }
    }
}

impl Serialize for RequirementType {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RequirementType {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(RequirementType::from(String::deserialize(d)?.as_str()))
    }
}

/// Requirement priority as declared (or inferred) in the SRS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
    Other(String),
}

impl Priority {
    fn as_str(&self) -> &str {
        match self {
            Priority::Critical => "Critical",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
            Priority::Other(s) => s,
        }
    }
}

impl From<&str> for Priority {
    fn from(s: &str) -> Self {
        match s {
            "Critical" => Priority::Critical,
            "High" => Priority::High,
            "Medium" => Priority::Medium,
            "Low" => Priority::Low,
            other => Priority::Other(other.to_string()),
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(Priority::from(String::deserialize(d)?.as_str()))
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// A requirement extracted from the SRS (and sometimes primed by the SDD
/// matrix during E2, see `doc-extract`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// Stable surrogate ID: `REQ-<file_path>-<NNN>`.
    pub id: String,
    /// Identifier as written in the document (`REQ-001`, etc.).
    pub reference_id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: RequirementType,
    pub priority: Priority,
    /// Full "<number> <title>" section heading the requirement was found under.
    pub section: String,
    pub file_path: String,
}

/// Design element type (class, module, use case, diagram, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesignElementType {
    Class,
    Module,
    UseCase,
    Diagram,
    Interface,
    Component,
    Other(String),
}

impl DesignElementType {
    fn as_str(&self) -> &str {
        match self {
            DesignElementType::Class => "Class",
            DesignElementType::Module => "Module",
            DesignElementType::UseCase => "UseCase",
            DesignElementType::Diagram => "Diagram",
            DesignElementType::Interface => "Interface",
            DesignElementType::Component => "Component",
            DesignElementType::Other(s) => s,
        }
    }
}

impl From<&str> for DesignElementType {
    fn from(s: &str) -> Self {
        match s {
            "Class" => DesignElementType::Class,
            "Module" => DesignElementType::Module,
            "UseCase" => DesignElementType::UseCase,
            "Diagram" => DesignElementType::Diagram,
            "Interface" => DesignElementType::Interface,
            "Component" => DesignElementType::Component,
            other => DesignElementType::Other(other.to_string()),
        }
    }
}

impl Serialize for DesignElementType {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DesignElementType {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(DesignElementType::from(String::deserialize(d)?.as_str()))
    }
}

/// A design element extracted from the SDD (E1) or from the SRS (E2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignElement {
    /// Stable surrogate ID: `DE-<file_path>-<NNN>`.
    pub id: String,
    /// Explicit identifier if present in the doc (`C01`, `UC01`); otherwise
    /// synthesized as `<Name>-<Type>` from the nearest heading.
    pub reference_id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: DesignElementType,
    pub section: String,
    pub file_path: String,
}

/// A source file identified purely by path/name (Non-goal: no parsing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeComponent {
    /// Stable surrogate ID: `CC-<NNN>`.
    pub id: String,
    pub path: String,
    pub name: String,
    /// File extension (e.g. `rs`, `py`), or `"File"` when there is none.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Tagged-variant node, used wherever the graph must iterate all kinds
/// uniformly (e.g. deletion cascades, ID lookups).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node_kind")]
pub enum Node {
    Requirement(Requirement),
    DesignElement(DesignElement),
    CodeComponent(CodeComponent),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Requirement(_) => NodeKind::Requirement,
            Node::DesignElement(_) => NodeKind::DesignElement,
            Node::CodeComponent(_) => NodeKind::CodeComponent,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Node::Requirement(r) => &r.id,
            Node::DesignElement(d) => &d.id,
            Node::CodeComponent(c) => &c.id,
        }
    }

    /// The document/source path this node was extracted from.
    ///
    /// `CodeComponent`'s path plays the same role as `file_path` on the
    /// document-derived kinds, so callers that scope lookups by "this file"
    /// can treat all three kinds uniformly.
    pub fn file_path(&self) -> &str {
        match self {
            Node::Requirement(r) => &r.file_path,
            Node::DesignElement(d) => &d.file_path,
            Node::CodeComponent(c) => &c.path,
        }
    }

    /// The in-document identifier (`reference_id` for doc-derived kinds,
    /// `path` for code components, which have no separate reference id).
    pub fn reference_id(&self) -> &str {
        match self {
            Node::Requirement(r) => &r.reference_id,
            Node::DesignElement(d) => &d.reference_id,
            Node::CodeComponent(c) => &c.path,
        }
    }

    pub fn as_requirement(&self) -> Option<&Requirement> {
        match self {
            Node::Requirement(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_design_element(&self) -> Option<&DesignElement> {
        match self {
            Node::DesignElement(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_code_component(&self) -> Option<&CodeComponent> {
        match self {
            Node::CodeComponent(c) => Some(c),
            _ => None,
        }
    }
}
