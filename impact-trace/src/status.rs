//! Traceability status classification (spec §4.10 step 1).

use change_classify::{ChangeType, CodeChangeClassification};
use trace_model::{EdgeKind, TraceMap};

use crate::model::{AnomalyKind, TraceabilityStatus};

/// Classifies one change's traceability status against `map`.
///
/// Mapped means: the changed path names an existing `CodeComponent` that
/// has at least one incoming D->C edge. The four (mapped?, type) cells the
/// spec doesn't name collapse onto the matching `anomaly` subtype:
///
/// | mapped | type         | status                          |
/// |--------|--------------|----------------------------------|
/// | yes    | Modification | `Modification`                   |
/// | yes    | Rename       | `Rename`                          |
/// | yes    | Deletion     | `Outdated`                        |
/// | yes    | Addition     | `Anomaly(AdditionMapped)`         |
/// | no     | Addition     | `Gap`                             |
/// | no     | Modification | `Anomaly(ModificationUnmapped)`   |
/// | no     | Deletion     | `Anomaly(DeletionUnmapped)`       |
/// | no     | Rename       | `Anomaly(RenameUnmapped)`         |
pub fn classify_status(map: &TraceMap, change: &CodeChangeClassification) -> TraceabilityStatus {
    let component = map.code_components().find(|c| c.path == change.file);
    let mapped = component.is_some_and(|c| {
        map.edges
            .iter()
            .any(|e| e.kind() == Some(EdgeKind::DesignToCode) && e.target_id == c.id)
    });

    match (mapped, change.change_type) {
        (true, ChangeType::Modification) => TraceabilityStatus::Modification,
        (true, ChangeType::Rename) => TraceabilityStatus::Rename,
        (true, ChangeType::Deletion) => TraceabilityStatus::Outdated,
        (true, ChangeType::Addition) => TraceabilityStatus::Anomaly(AnomalyKind::AdditionMapped),
        (false, ChangeType::Addition) => TraceabilityStatus::Gap,
        (false, ChangeType::Modification) => {
            TraceabilityStatus::Anomaly(AnomalyKind::ModificationUnmapped)
        }
        (false, ChangeType::Deletion) => TraceabilityStatus::Anomaly(AnomalyKind::DeletionUnmapped),
        (false, ChangeType::Rename) => TraceabilityStatus::Anomaly(AnomalyKind::RenameUnmapped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use change_classify::{ChangeNature, ChangeScope, ChangeVolume};
    use trace_model::{CodeComponent, DesignElement, DesignElementType, IdAllocator, Node, RelationshipType};

    fn classification(file: &str, change_type: ChangeType) -> CodeChangeClassification {
        CodeChangeClassification {
            file: file.to_string(),
            change_type,
            scope: ChangeScope::FunctionMethod,
            nature: ChangeNature::BugFix,
            volume: ChangeVolume::Small,
            reasoning: String::new(),
        }
    }

    fn mapped_map() -> TraceMap {
        let mut map = TraceMap::new("acme/widgets", "main");
        map.insert_node(Node::DesignElement(DesignElement {
            id: "DE-docs/sdd.md-001".to_string(),
            reference_id: "Book-Class".to_string(),
            name: "Book".to_string(),
            description: String::new(),
            kind: DesignElementType::Class,
            section: "1".to_string(),
            file_path: "docs/sdd.md".to_string(),
        }))
        .unwrap();
        map.insert_node(Node::CodeComponent(CodeComponent {
            id: "CC-001".to_string(),
            path: "src/book.rs".to_string(),
            name: "book.rs".to_string(),
            kind: "rs".to_string(),
        }))
        .unwrap();
        let mut alloc: IdAllocator = map.allocator();
        map.insert_edge(&mut alloc, "DE-docs/sdd.md-001", "CC-001", RelationshipType::Implements)
            .unwrap();
        map
    }

    #[test]
    fn mapped_modification_is_modification() {
        let map = mapped_map();
        let status = classify_status(&map, &classification("src/book.rs", ChangeType::Modification));
        assert_eq!(status, TraceabilityStatus::Modification);
    }

    #[test]
    fn mapped_deletion_is_outdated() {
        let map = mapped_map();
        let status = classify_status(&map, &classification("src/book.rs", ChangeType::Deletion));
        assert_eq!(status, TraceabilityStatus::Outdated);
    }

    #[test]
    fn unmapped_addition_is_gap() {
        let map = mapped_map();
        let status = classify_status(&map, &classification("src/new_thing.rs", ChangeType::Addition));
        assert_eq!(status, TraceabilityStatus::Gap);
    }

    #[test]
    fn mapped_addition_is_anomaly() {
        let map = mapped_map();
        let status = classify_status(&map, &classification("src/book.rs", ChangeType::Addition));
        assert_eq!(status, TraceabilityStatus::Anomaly(AnomalyKind::AdditionMapped));
    }

    #[test]
    fn unmapped_deletion_is_anomaly() {
        let map = mapped_map();
        let status = classify_status(&map, &classification("src/gone.rs", ChangeType::Deletion));
        assert_eq!(status, TraceabilityStatus::Anomaly(AnomalyKind::DeletionUnmapped));
    }
}
