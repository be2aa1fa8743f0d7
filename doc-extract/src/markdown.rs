//! Minimal Markdown structure extraction: heading sections, embedded
//! images, and traceability-matrix table rows.
//!
//! This is not a CommonMark parser — it only pulls out the handful of
//! structures §4.4 actually needs (headings, images, pipe tables), the way
//! `codegraph-prep` reaches for targeted `regex` passes over source rather
//! than a full grammar when it only needs a few shapes back.

use regex::Regex;
use std::sync::LazyLock;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^(#{1,6})\s+(.+?)\s*$").unwrap());
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());
static TABLE_ROW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\|(.+)\|\s*$").unwrap());

/// One heading-delimited section of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Full "<number> <title>" text as written (heading markers stripped).
    pub heading: String,
    pub body: String,
}

/// Splits `text` into sections at each Markdown heading. Content before
/// the first heading is returned as a section with an empty heading.
pub fn split_sections(text: &str) -> Vec<Section> {
    let mut matches: Vec<(usize, usize, String)> = HEADING_RE
        .captures_iter(text)
        .map(|c| {
            let m = c.get(0).unwrap();
            (m.start(), m.end(), c[2].trim().to_string())
        })
        .collect();
    matches.sort_by_key(|(start, ..)| *start);

    let mut sections = Vec::new();
    if let Some((first_start, ..)) = matches.first() {
        if *first_start > 0 {
            sections.push(Section {
                heading: String::new(),
                body: text[..*first_start].to_string(),
            });
        }
    } else {
        sections.push(Section {
            heading: String::new(),
            body: text.to_string(),
        });
        return sections;
    }

    for (i, (_, end, heading)) in matches.iter().enumerate() {
        let body_end = matches.get(i + 1).map(|(s, ..)| *s).unwrap_or(text.len());
        sections.push(Section {
            heading: heading.clone(),
            body: text[*end..body_end].to_string(),
        });
    }
    sections
}

/// An embedded image reference (`![alt](path)`).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRef {
    pub alt: String,
    pub path: String,
}

/// All images embedded anywhere in `text`.
pub fn find_images(text: &str) -> Vec<ImageRef> {
    IMAGE_RE
        .captures_iter(text)
        .map(|c| ImageRef {
            alt: c[1].trim().to_string(),
            path: c[2].trim().to_string(),
        })
        .collect()
}

/// The filename stem of an image path (no directories, no extension).
pub fn filename_stem(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rsplit_once('.') {
        Some((stem, _ext)) => stem.to_string(),
        None => name.to_string(),
    }
}

/// Parses a GitHub-flavored pipe table into rows of trimmed cell text,
/// skipping the header separator row (`|---|---|`).
pub fn parse_pipe_table(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    for m in TABLE_ROW_RE.captures_iter(text) {
        let cells: Vec<String> = m[1].split('|').map(|c| c.trim().to_string()).collect();
        if cells.iter().all(|c| c.chars().all(|ch| ch == '-' || ch == ':' || ch.is_whitespace())) {
            continue;
        }
        rows.push(cells);
    }
    // Drop the header row itself (first non-separator row), matrix rows
    // start from the first data row.
    if !rows.is_empty() {
        rows.remove(0);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_headings() {
        let text = "intro text\n# 1 Overview\nbody one\n## 1.1 Detail\nbody two\n";
        let sections = split_sections(text);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].heading, "");
        assert_eq!(sections[1].heading, "1 Overview");
        assert!(sections[1].body.contains("body one"));
        assert_eq!(sections[2].heading, "1.1 Detail");
    }

    #[test]
    fn finds_images_with_and_without_caption() {
        let text = "![Login flow](diagrams/login-flow.png) and ![](diagrams/misc.png)";
        let images = find_images(text);
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].alt, "Login flow");
        assert_eq!(filename_stem(&images[1].path), "misc");
    }

    #[test]
    fn parses_pipe_table_skipping_separator_and_header() {
        let text = "| Req | Design |\n|---|---|\n| REQ-001 | Book |\n| REQ-002 | Loan |\n";
        let rows = parse_pipe_table(text);
        assert_eq!(rows, vec![vec!["REQ-001", "Book"], vec!["REQ-002", "Loan"]]);
    }
}
