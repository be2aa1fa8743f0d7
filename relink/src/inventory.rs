//! Code inventory refresh with ID reuse by path (spec §4.7 step 2).

use std::collections::{HashMap, HashSet};

use tracing::info;
use trace_model::{CodeComponent, IdAllocator, Node, NodeKind, TraceMap};

/// Rebuilds the `CodeComponent` population from a fresh repo snapshot,
/// reusing a component's existing surrogate ID where its `path` already
/// existed, minting a new one otherwise. Components whose path disappeared
/// are removed, cascading their edges (spec §3: "`CodeComponent` lifecycle
/// mirrors the full code scan on every update").
///
/// Returns the refreshed components paired with their snapshot content, for
/// use as D->C link-classification targets.
pub fn refresh_code_inventory(
    map: &mut TraceMap,
    alloc: &mut IdAllocator,
    files: &[repo_snapshot::SnapshotFile],
) -> Vec<(CodeComponent, String)> {
    let existing: HashMap<String, CodeComponent> = map
        .code_components()
        .map(|c| (c.path.clone(), c.clone()))
        .collect();

    let mut seen_paths: HashSet<String> = HashSet::new();
    let mut refreshed = Vec::with_capacity(files.len());

    for f in files {
        seen_paths.insert(f.path.clone());
        let component = match existing.get(&f.path) {
            Some(c) => c.clone(),
            None => {
                let id = alloc.next_code_component_id();
                CodeComponent {
                    id,
                    name: file_name(&f.path),
                    kind: extension_or_file(&f.path),
                    path: f.path.clone(),
                }
            }
        };
        refreshed.push((component, f.content.clone().unwrap_or_default()));
    }

    let vanished: Vec<String> = map
        .code_components()
        .filter(|c| !seen_paths.contains(&c.path))
        .map(|c| c.id.clone())
        .collect();
    for id in &vanished {
        map.remove_node(id);
    }

    map.nodes.retain(|n| n.kind() != NodeKind::CodeComponent);
    for (component, _) in &refreshed {
        map.nodes.push(Node::CodeComponent(component.clone()));
    }

    info!(
        total = refreshed.len(),
        removed = vanished.len(),
        "code inventory refreshed"
    );

    refreshed
}

fn file_name(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

fn extension_or_file(path: &str) -> String {
    file_name(path)
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_string())
        .unwrap_or_else(|| "File".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use repo_snapshot::SnapshotFile;

    fn snap(path: &str) -> SnapshotFile {
        SnapshotFile {
            path: path.to_string(),
            content: Some("fn main() {}".to_string()),
            is_binary: false,
        }
    }

    #[test]
    fn reuses_id_for_unchanged_path_and_drops_vanished() {
        let mut map = TraceMap::new("acme/widgets", "main");
        map.insert_node(Node::CodeComponent(CodeComponent {
            id: "CC-001".to_string(),
            path: "src/lib.rs".to_string(),
            name: "lib.rs".to_string(),
            kind: "rs".to_string(),
        }))
        .unwrap();
        map.insert_node(Node::CodeComponent(CodeComponent {
            id: "CC-002".to_string(),
            path: "src/old.rs".to_string(),
            name: "old.rs".to_string(),
            kind: "rs".to_string(),
        }))
        .unwrap();
        let mut alloc = map.allocator();

        let refreshed = refresh_code_inventory(
            &mut map,
            &mut alloc,
            &[snap("src/lib.rs"), snap("src/new.rs")],
        );

        assert_eq!(refreshed.len(), 2);
        assert!(refreshed.iter().any(|(c, _)| c.id == "CC-001" && c.path == "src/lib.rs"));
        assert!(!map.node_exists("CC-002"));
        assert!(refreshed.iter().any(|(c, _)| c.path == "src/new.rs" && c.id != "CC-001"));
    }
}
