//! "This file" ground-truth lookup: `^(REQ|DE)-<escaped_path>-\d+$` over
//! every node's surrogate ID (spec §4.6).

use regex::Regex;
use trace_model::{Node, TraceMap};

/// Every `Requirement`/`DesignElement` node belonging to `file_path`, found
/// by matching its surrogate ID rather than scanning `file_path` fields
/// directly, so a file whose path changed mid-run still resolves against
/// whichever ID prefix it was minted under.
pub fn ground_truth_for_file<'a>(map: &'a TraceMap, file_path: &str) -> Vec<&'a Node> {
    let escaped = regex::escape(file_path);
    let pattern = format!(r"^(REQ|DE)-{escaped}-\d+$");
    let re = Regex::new(&pattern).expect("pattern built from escaped literal is always valid");

    map.nodes
        .iter()
        .filter(|n| matches!(n, Node::Requirement(_) | Node::DesignElement(_)) && re.is_match(n.id()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use trace_model::{DesignElement, DesignElementType};

    #[test]
    fn matches_only_ids_for_this_file() {
        let mut map = TraceMap::new("acme/widgets", "main");
        map.insert_node(trace_model::Node::DesignElement(DesignElement {
            id: "DE-docs/sdd.md-001".to_string(),
            reference_id: "Book-Class".to_string(),
            name: "Book".to_string(),
            description: String::new(),
            kind: DesignElementType::Class,
            section: "1".to_string(),
            file_path: "docs/sdd.md".to_string(),
        }))
        .unwrap();
        map.insert_node(trace_model::Node::DesignElement(DesignElement {
            id: "DE-docs/other.md-001".to_string(),
            reference_id: "Loan-Class".to_string(),
            name: "Loan".to_string(),
            description: String::new(),
            kind: DesignElementType::Class,
            section: "1".to_string(),
            file_path: "docs/other.md".to_string(),
        }))
        .unwrap();

        let found = ground_truth_for_file(&map, "docs/sdd.md");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), "DE-docs/sdd.md-001");
    }
}
