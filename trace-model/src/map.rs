//! [`TraceMap`]: the full persisted unit for one `(repository, branch)`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

use crate::edge::{Edge, EdgeKind, RelationshipType};
use crate::error::ModelError;
use crate::ids::IdAllocator;
use crate::node::{CodeComponent, DesignElement, Node, NodeKind, Requirement};

/// The complete traceability graph for one `(repository, branch)`.
///
/// Always saved/loaded as a whole — no partial projections (spec §4.1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceMap {
    pub repository: String,
    pub branch: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Commit the graph was last synced to. `None` for maps written before
    /// this field existed, or for a fresh baseline that hasn't recorded one
    /// yet; `#[serde(default)]` keeps those older files loadable.
    #[serde(default)]
    pub last_synced_commit_sha: Option<String>,
}

impl TraceMap {
    /// Creates an empty map for a repository/branch pair (Core A entry point).
    pub fn new(repository: impl Into<String>, branch: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            repository: repository.into(),
            branch: branch.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
            created_at: now,
            updated_at: now,
            last_synced_commit_sha: None,
        }
    }

    /// Records the commit this map's state now reflects, bumping
    /// `updated_at` (Core A/B: set once after baseline-create finishes its
    /// initial scan, and again after every successful relink).
    pub fn set_last_synced_commit_sha(&mut self, commit_sha: impl Into<String>) {
        self.last_synced_commit_sha = Some(commit_sha.into());
        self.updated_at = Utc::now();
    }

    /// Builds an allocator that continues numbering past every ID currently
    /// in this map (see [`IdAllocator::recompute_from`]).
    pub fn allocator(&self) -> IdAllocator {
        IdAllocator::recompute_from(&self.nodes, &self.edges)
    }

    pub fn requirements(&self) -> impl Iterator<Item = &Requirement> {
        self.nodes.iter().filter_map(Node::as_requirement)
    }

    pub fn design_elements(&self) -> impl Iterator<Item = &DesignElement> {
        self.nodes.iter().filter_map(Node::as_design_element)
    }

    pub fn code_components(&self) -> impl Iterator<Item = &CodeComponent> {
        self.nodes.iter().filter_map(Node::as_code_component)
    }

    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn node_exists(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id() == id)
    }

    /// Finds a node of `kind` by its document-facing `reference_id`
    /// (`Book-Class`, a code component's path, ...), as opposed to
    /// [`TraceMap::find_node`]'s lookup by internal surrogate ID.
    ///
    /// Link-classification prompts hand the model `reference_id`s (the
    /// model never sees surrogate IDs), so every proposed edge must be
    /// resolved through this before it reaches [`TraceMap::insert_edge`].
    pub fn find_node_by_reference(&self, kind: NodeKind, reference_id: &str) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|n| n.kind() == kind && n.reference_id() == reference_id)
    }

    /// Nodes of `kind` extracted from `file_path`, matching the ground-truth
    /// lookup regex of §4.6 (`^(REQ|DE)-<escaped_path>-\d+$`) in spirit —
    /// here expressed structurally rather than via regex re-parsing of IDs.
    pub fn nodes_in_file(&self, file_path: &str) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.file_path() == file_path)
    }

    /// Inserts a node, enforcing I1 (unique `reference_id` within
    /// `(file_path, kind)`).
    pub fn insert_node(&mut self, node: Node) -> Result<(), ModelError> {
        let kind = node.kind();
        let file_path = node.file_path().to_string();
        let reference_id = node.reference_id().to_string();

        let dup = self.nodes.iter().any(|n| {
            n.kind() == kind && n.file_path() == file_path && n.reference_id() == reference_id
        });
        if dup {
            return Err(ModelError::DuplicateReferenceId {
                file_path,
                reference_id,
                kind,
            });
        }
        self.nodes.push(node);
        self.touch();
        Ok(())
    }

    /// Removes a node and every edge touching it (used by both single-node
    /// deletion and the document-deletion cascade below).
    pub fn remove_node(&mut self, id: &str) {
        self.nodes.retain(|n| n.id() != id);
        self.edges.retain(|e| !e.touches(id));
        self.touch();
    }

    /// Document deletion cascade: removes every node whose `file_path`
    /// matches, and every edge touching any of them (spec §3 lifecycle).
    pub fn remove_nodes_by_file_path(&mut self, file_path: &str) {
        let removed_ids: HashSet<String> = self
            .nodes
            .iter()
            .filter(|n| n.file_path() == file_path)
            .map(|n| n.id().to_string())
            .collect();
        if removed_ids.is_empty() {
            return;
        }
        self.nodes.retain(|n| !removed_ids.contains(n.id()));
        self.edges
            .retain(|e| !removed_ids.contains(&e.source_id) && !removed_ids.contains(&e.target_id));
        self.touch();
    }

    /// Overwrites the node at `id` with `updated` in place, keeping its
    /// position and leaving edges untouched. Used to land a modification's
    /// post-change field values once its stale edges have already been
    /// cleared (spec §4.7 step 1/6). Does not re-check I1: callers apply
    /// deltas onto an already-unique node, not a fresh one.
    pub fn replace_node(&mut self, id: &str, updated: Node) {
        if let Some(slot) = self.nodes.iter_mut().find(|n| n.id() == id) {
            *slot = updated;
            self.touch();
        }
    }

    /// Removes every edge touching `node_id`, without touching the node
    /// itself. Used by the relinker's invalidation step (spec §4.7 step 1).
    pub fn remove_edges_touching(&mut self, node_id: &str) {
        let before = self.edges.len();
        self.edges.retain(|e| !e.touches(node_id));
        if self.edges.len() != before {
            self.touch();
        }
    }

    /// Validates and inserts a new typed edge, enforcing I2 (endpoints
    /// exist), I3 (D->D acyclic), and I4 (relationship vocabulary). Assigns
    /// a fresh ID from `alloc` and returns it.
    pub fn insert_edge(
        &mut self,
        alloc: &mut IdAllocator,
        source_id: &str,
        target_id: &str,
        relationship_type: RelationshipType,
    ) -> Result<String, ModelError> {
        let source = self
            .find_node(source_id)
            .ok_or_else(|| ModelError::UnknownEdgeEndpoint(source_id.to_string()))?;
        let target = self
            .find_node(target_id)
            .ok_or_else(|| ModelError::UnknownEdgeEndpoint(target_id.to_string()))?;

        let edge_kind = EdgeKind::for_endpoints(source.kind(), target.kind()).ok_or(
            ModelError::IllegalEdgeDirection {
                source_kind: source.kind(),
                target_kind: target.kind(),
            },
        )?;

        if !edge_kind.allowed_relationships().contains(&relationship_type) {
            return Err(ModelError::InvalidRelationshipType {
                source_kind: source.kind(),
                target_kind: target.kind(),
                relationship_type: relationship_type.as_str().to_string(),
            });
        }

        if edge_kind == EdgeKind::DesignToDesign && self.would_create_cycle(source_id, target_id) {
            return Err(ModelError::CycleDetected {
                source_id: source_id.to_string(),
                target_id: target_id.to_string(),
            });
        }

        let id = alloc.next_edge_id(edge_kind);
        self.edges.push(Edge {
            id: id.clone(),
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
            relationship_type,
            created_at: Utc::now(),
        });
        self.touch();
        Ok(id)
    }

    /// True if adding `source -> target` to the D->D subgraph would close a
    /// cycle, i.e. `target` can already reach `source` via existing D->D
    /// edges (BFS over the reverse-would-be path).
    fn would_create_cycle(&self, source_id: &str, target_id: &str) -> bool {
        if source_id == target_id {
            return true;
        }
        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        queue.push_back(target_id);
        seen.insert(target_id);

        while let Some(current) = queue.pop_front() {
            if current == source_id {
                return true;
            }
            for e in &self.edges {
                if e.source_id == current
                    && e.kind() == Some(EdgeKind::DesignToDesign)
                    && seen.insert(&e.target_id)
                {
                    queue.push_back(&e.target_id);
                }
            }
        }
        false
    }

    /// True if the D->D subgraph contains any directed cycle (property P3,
    /// used by tests and by the baseline builder's post-condition checks).
    pub fn design_graph_is_acyclic(&self) -> bool {
        let dd_edges: Vec<&Edge> = self
            .edges
            .iter()
            .filter(|e| e.kind() == Some(EdgeKind::DesignToDesign))
            .collect();

        let mut visiting: HashSet<&str> = HashSet::new();
        let mut done: HashSet<&str> = HashSet::new();

        fn visit<'a>(
            node: &'a str,
            edges: &[&'a Edge],
            visiting: &mut HashSet<&'a str>,
            done: &mut HashSet<&'a str>,
        ) -> bool {
            if done.contains(node) {
                return true;
            }
            if !visiting.insert(node) {
                return false;
            }
            for e in edges.iter().filter(|e| e.source_id == node) {
                if !visit(&e.target_id, edges, visiting, done) {
                    return false;
                }
            }
            visiting.remove(node);
            done.insert(node);
            true
        }

        for e in &dd_edges {
            if !visit(&e.source_id, &dd_edges, &mut visiting, &mut done) {
                return false;
            }
        }
        true
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl PartialEq for TraceMap {
    /// Structural equality ignoring `updated_at`, for round-trip tests
    /// (spec R1/R2: "maps equal up to ID renumbering" / "only `updated_at`
    /// differs").
    fn eq(&self, other: &Self) -> bool {
        self.repository == other.repository
            && self.branch == other.branch
            && self.nodes == other.nodes
            && self.edges == other.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{DesignElementType, RequirementType};

    fn de(id: &str, reference_id: &str, file_path: &str) -> Node {
        Node::DesignElement(DesignElement {
            id: id.to_string(),
            reference_id: reference_id.to_string(),
            name: reference_id.to_string(),
            description: String::new(),
            kind: DesignElementType::Class,
            section: "1 Intro".to_string(),
            file_path: file_path.to_string(),
        })
    }

    fn req(id: &str, reference_id: &str, file_path: &str) -> Node {
        Node::Requirement(Requirement {
            id: id.to_string(),
            reference_id: reference_id.to_string(),
            title: reference_id.to_string(),
            description: String::new(),
            kind: RequirementType::Functional,
            priority: crate::node::Priority::Medium,
            section: "1 Intro".to_string(),
            file_path: file_path.to_string(),
        })
    }

    #[test]
    fn duplicate_reference_id_rejected() {
        let mut map = TraceMap::new("acme/widgets", "main");
        map.insert_node(de("DE-docs/sdd.md-001", "Book-Class", "docs/sdd.md"))
            .unwrap();
        let err = map
            .insert_node(de("DE-docs/sdd.md-002", "Book-Class", "docs/sdd.md"))
            .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateReferenceId { .. }));
    }

    #[test]
    fn edge_requires_existing_endpoints() {
        let mut map = TraceMap::new("acme/widgets", "main");
        let mut alloc = map.allocator();
        let err = map
            .insert_edge(&mut alloc, "REQ-missing-001", "DE-missing-001", RelationshipType::Satisfies)
            .unwrap_err();
        assert!(matches!(err, ModelError::UnknownEdgeEndpoint(_)));
    }

    #[test]
    fn edge_rejects_out_of_vocabulary_relationship() {
        let mut map = TraceMap::new("acme/widgets", "main");
        map.insert_node(req("REQ-docs/srs.md-001", "REQ-001", "docs/srs.md"))
            .unwrap();
        map.insert_node(de("DE-docs/sdd.md-001", "Book-Class", "docs/sdd.md"))
            .unwrap();
        let mut alloc = map.allocator();
        let err = map
            .insert_edge(
                &mut alloc,
                "REQ-docs/srs.md-001",
                "DE-docs/sdd.md-001",
                RelationshipType::DependsOn,
            )
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidRelationshipType { .. }));
    }

    #[test]
    fn dd_edge_rejecting_cycle() {
        let mut map = TraceMap::new("acme/widgets", "main");
        map.insert_node(de("DE-docs/sdd.md-001", "A-Class", "docs/sdd.md"))
            .unwrap();
        map.insert_node(de("DE-docs/sdd.md-002", "B-Class", "docs/sdd.md"))
            .unwrap();
        let mut alloc = map.allocator();
        map.insert_edge(
            &mut alloc,
            "DE-docs/sdd.md-001",
            "DE-docs/sdd.md-002",
            RelationshipType::DependsOn,
        )
        .unwrap();

        let err = map
            .insert_edge(
                &mut alloc,
                "DE-docs/sdd.md-002",
                "DE-docs/sdd.md-001",
                RelationshipType::DependsOn,
            )
            .unwrap_err();
        assert!(matches!(err, ModelError::CycleDetected { .. }));
        assert!(map.design_graph_is_acyclic());
    }

    #[test]
    fn document_deletion_cascades() {
        let mut map = TraceMap::new("acme/widgets", "main");
        map.insert_node(req("REQ-docs/srs.md-001", "REQ-001", "docs/srs.md"))
            .unwrap();
        map.insert_node(de("DE-docs/sdd.md-001", "Book-Class", "docs/sdd.md"))
            .unwrap();
        let mut alloc = map.allocator();
        map.insert_edge(
            &mut alloc,
            "REQ-docs/srs.md-001",
            "DE-docs/sdd.md-001",
            RelationshipType::Satisfies,
        )
        .unwrap();

        map.remove_nodes_by_file_path("docs/sdd.md");
        assert!(!map.node_exists("DE-docs/sdd.md-001"));
        assert!(map.edges.is_empty());
        assert!(map.node_exists("REQ-docs/srs.md-001"));
    }
}
