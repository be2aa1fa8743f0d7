//! Stable surrogate-ID allocation.
//!
//! Counters are monotonic per `(kind, file_path)` for nodes and per edge-kind
//! namespace for edges (spec §3, §5 "ID allocator" design note). IDs are
//! never minted from inside concurrent batches: per §5, allocation happens
//! once, at the merge step after fan-in, so this allocator is plain
//! `&mut self` rather than anything shared/atomic.

use std::collections::HashMap;

use crate::edge::EdgeKind;
use crate::node::{Node, NodeKind};

/// Key under which a `CodeComponent` counter lives: code components have no
/// `file_path` of their own to partition by (their path *is* the component),
/// so they share one counter under this reserved bucket.
const CODE_COMPONENT_BUCKET: &str = "";

/// Monotonic ID allocator for one [`crate::TraceMap`].
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    node_counters: HashMap<(NodeKind, String), u32>,
    edge_counters: HashMap<EdgeKind, u32>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds counters from the highest `NNN` suffix already present in
    /// `nodes`/`edges`, so a freshly-loaded map continues numbering instead
    /// of restarting at 1 and risking collisions.
    pub fn recompute_from(nodes: &[Node], edges: &[crate::edge::Edge]) -> Self {
        let mut alloc = Self::new();
        for n in nodes {
            let key = match n.kind() {
                NodeKind::CodeComponent => (NodeKind::CodeComponent, CODE_COMPONENT_BUCKET.to_string()),
                kind => (kind, n.file_path().to_string()),
            };
            if let Some(n) = trailing_number(n.id()) {
                let slot = alloc.node_counters.entry(key).or_insert(0);
                *slot = (*slot).max(n);
            }
        }
        for e in edges {
            if let (Some(kind), Some(n)) = (e.kind(), trailing_number(&e.id)) {
                let slot = alloc.edge_counters.entry(kind).or_insert(0);
                *slot = (*slot).max(n);
            }
        }
        alloc
    }

    /// Allocates the next `REQ-<file_path>-<NNN>` or `DE-<file_path>-<NNN>` ID.
    pub fn next_doc_node_id(&mut self, kind: NodeKind, file_path: &str) -> String {
        debug_assert!(kind != NodeKind::CodeComponent);
        let counter = self
            .node_counters
            .entry((kind, file_path.to_string()))
            .or_insert(0);
        *counter += 1;
        format!("{}-{}-{:03}", kind.id_prefix(), file_path, counter)
    }

    /// Allocates the next `CC-<NNN>` ID.
    pub fn next_code_component_id(&mut self) -> String {
        let counter = self
            .node_counters
            .entry((NodeKind::CodeComponent, CODE_COMPONENT_BUCKET.to_string()))
            .or_insert(0);
        *counter += 1;
        format!("CC-{:03}", counter)
    }

    /// Allocates the next edge ID for the given edge kind (`RD-`/`DD-`/`DC-`).
    pub fn next_edge_id(&mut self, kind: EdgeKind) -> String {
        let counter = self.edge_counters.entry(kind).or_insert(0);
        *counter += 1;
        format!("{}-{:03}", kind.id_prefix(), counter)
    }
}

/// Parses the trailing `-NNN` numeric suffix off an ID, ignoring everything
/// before the last `-`. Returns `None` if the tail isn't numeric.
fn trailing_number(id: &str) -> Option<u32> {
    id.rsplit('-').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_node_ids_are_monotonic_per_file() {
        let mut alloc = IdAllocator::new();
        assert_eq!(
            alloc.next_doc_node_id(NodeKind::Requirement, "docs/srs.md"),
            "REQ-docs/srs.md-001"
        );
        assert_eq!(
            alloc.next_doc_node_id(NodeKind::Requirement, "docs/srs.md"),
            "REQ-docs/srs.md-002"
        );
        // A different file starts its own counter.
        assert_eq!(
            alloc.next_doc_node_id(NodeKind::Requirement, "docs/other.md"),
            "REQ-docs/other.md-001"
        );
    }

    #[test]
    fn code_component_ids_share_one_counter() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.next_code_component_id(), "CC-001");
        assert_eq!(alloc.next_code_component_id(), "CC-002");
    }

    #[test]
    fn recompute_continues_past_existing_ids() {
        let mut alloc = IdAllocator::new();
        let _ = alloc.next_doc_node_id(NodeKind::Requirement, "docs/srs.md");
        let _ = alloc.next_doc_node_id(NodeKind::Requirement, "docs/srs.md");
        let third = alloc.next_doc_node_id(NodeKind::Requirement, "docs/srs.md");
        assert_eq!(third, "REQ-docs/srs.md-003");

        let trailing = trailing_number(&third).unwrap();
        assert_eq!(trailing, 3);
    }
}
