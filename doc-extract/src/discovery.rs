//! Document discovery: picking which snapshot files are SDD/SRS candidates
//! (spec §6: "case-insensitive filename match against a fixed list ...
//! under repo root or `docs/`").

const SDD_KEYWORDS: &[&str] = &["design", "sdd"];
const SRS_KEYWORDS: &[&str] = &["srs", "requirements"];
const TRACEABILITY_KEYWORDS: &[&str] = &["traceability"];

/// The kind of document a candidate path looks like, by filename alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Sdd,
    Srs,
    /// A standalone traceability matrix, not embedded in an SDD/SRS.
    Traceability,
}

/// Classifies `path` as a document candidate, or `None` if it doesn't look
/// like one of the recognized kinds, isn't Markdown, or isn't at repo root
/// / under `docs/`.
pub fn classify(path: &str) -> Option<DocumentKind> {
    if !path.to_ascii_lowercase().ends_with(".md") {
        return None;
    }
    if !at_root_or_docs(path) {
        return None;
    }

    let stem = path.rsplit('/').next().unwrap_or(path).to_ascii_lowercase();

    if TRACEABILITY_KEYWORDS.iter().any(|k| stem.contains(k)) {
        Some(DocumentKind::Traceability)
    } else if SDD_KEYWORDS.iter().any(|k| stem.contains(k)) {
        Some(DocumentKind::Sdd)
    } else if SRS_KEYWORDS.iter().any(|k| stem.contains(k)) {
        Some(DocumentKind::Srs)
    } else {
        None
    }
}

fn at_root_or_docs(path: &str) -> bool {
    match path.rsplit_once('/') {
        None => true,
        Some((dir, _)) => dir.eq_ignore_ascii_case("docs"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_sdd_and_srs_variants_at_root_and_docs() {
        assert_eq!(classify("SDD.md"), Some(DocumentKind::Sdd));
        assert_eq!(classify("docs/Design-Document.md"), Some(DocumentKind::Sdd));
        assert_eq!(classify("docs/SRS.md"), Some(DocumentKind::Srs));
        assert_eq!(classify("Requirements.md"), Some(DocumentKind::Srs));
        assert_eq!(
            classify("docs/Traceability-Matrix.md"),
            Some(DocumentKind::Traceability)
        );
    }

    #[test]
    fn ignores_nested_and_unrelated_files() {
        assert_eq!(classify("docs/sub/SDD.md"), None);
        assert_eq!(classify("README.md"), None);
        assert_eq!(classify("docs/SDD.txt"), None);
    }
}
