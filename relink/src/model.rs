//! Inputs to one incremental relink run (spec §4.7).

use doc_diff::FileChangeStatus;

/// One changed Markdown document (SDD or SRS) feeding the relinker's
/// doc-diff pass. Diff retrieval (mapping a commit to this list) is a CLI
/// concern; the relinker only needs the two content snapshots per file.
#[derive(Debug, Clone)]
pub struct ChangedDocument {
    pub file_path: String,
    pub status: FileChangeStatus,
    pub old_content: Option<String>,
    pub new_content: Option<String>,
}

/// One changed source file, used only to decide which existing D->C edges
/// must be invalidated before the refreshed code inventory is built — the
/// inventory's actual contents come from a fresh [`repo_snapshot::snapshot`]
/// of `repo_root`, not from this list.
#[derive(Debug, Clone)]
pub struct ChangedCodeFile {
    pub path: String,
    pub status: FileChangeStatus,
}
