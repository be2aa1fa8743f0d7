//! `snapshot(repo_ref, ...) -> list<{path, content}>` (spec §4.2).
//!
//! Walks a checked-out working tree (the caller is responsible for having
//! the ref already checked out or cloned at `root`), honoring the fixed
//! ignore list and splitting files into UTF-8 text vs. binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, instrument, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::SnapshotError;
use crate::ignore::{is_ignored_dir, is_ignored_lockfile};

/// Default cap on a single file's size before it's treated as skippable
/// noise rather than read into memory (10 MiB).
const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// One file as captured by a snapshot. `content` is `None` for binary
/// files and for files exceeding the size cap — the path is still
/// reported so callers building a `CodeComponent` inventory see it.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotFile {
    /// Path relative to the snapshot root, using forward slashes.
    pub path: String,
    pub content: Option<String>,
    pub is_binary: bool,
}

/// Snapshots every non-ignored file under `root`, bounded by `timeout`.
///
/// On timeout, returns [`SnapshotError::Timeout`] rather than a partial
/// list — a timed-out scan is not a usable input to Core A/B (spec §4.2:
/// "on timeout returns ScanFailed").
#[instrument(skip_all, fields(root = %root.display()))]
pub async fn snapshot(root: &Path, timeout: Duration) -> Result<Vec<SnapshotFile>, SnapshotError> {
    let root = root.to_path_buf();
    let walk = tokio::task::spawn_blocking(move || walk_blocking(&root, DEFAULT_MAX_FILE_BYTES));

    match tokio::time::timeout(timeout, walk).await {
        Ok(Ok(Ok(files))) => {
            info!(count = files.len(), "repo snapshot complete");
            Ok(files)
        }
        Ok(Ok(Err(err))) => Err(err),
        Ok(Err(join_err)) => Err(SnapshotError::ScanFailed(join_err.to_string())),
        Err(_) => Err(SnapshotError::Timeout(timeout)),
    }
}

fn walk_blocking(root: &Path, max_file_bytes: u64) -> Result<Vec<SnapshotFile>, SnapshotError> {
    if !root.exists() {
        return Err(SnapshotError::ScanFailed(format!(
            "root does not exist: {}",
            root.display()
        )));
    }

    let mut files = Vec::new();
    let mut skipped_oversized = 0usize;
    let mut skipped_unreadable = 0usize;

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(keep_entry);

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "skipping unreadable directory entry");
                skipped_unreadable += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_ignored_lockfile(name) {
                continue;
            }
        }

        let path = entry.path();
        let rel = relative_slash_path(root, path);

        let meta = match entry.metadata() {
            Ok(m) => m,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "metadata failed");
                skipped_unreadable += 1;
                continue;
            }
        };

        if meta.len() > max_file_bytes {
            debug!(path = %path.display(), size = meta.len(), "skipping oversized file");
            skipped_oversized += 1;
            files.push(SnapshotFile {
                path: rel,
                content: None,
                is_binary: false,
            });
            continue;
        }

        match std::fs::read(path) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => files.push(SnapshotFile {
                    path: rel,
                    content: Some(text),
                    is_binary: false,
                }),
                Err(_) => files.push(SnapshotFile {
                    path: rel,
                    content: None,
                    is_binary: true,
                }),
            },
            Err(err) => {
                warn!(path = %path.display(), error = %err, "read failed");
                skipped_unreadable += 1;
            }
        }
    }

    info!(
        total = files.len(),
        skipped_oversized, skipped_unreadable, "fs scan finished"
    );
    Ok(files)
}

fn keep_entry(entry: &DirEntry) -> bool {
    if entry.file_type().is_dir() {
        if let Some(name) = entry.file_name().to_str() {
            return !is_ignored_dir(name);
        }
    }
    true
}

fn relative_slash_path(root: &Path, path: &Path) -> String {
    let rel: PathBuf = path.strip_prefix(root).unwrap_or(path).to_path_buf();
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn snapshots_text_and_skips_ignored_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        fs::write(dir.path().join("src/main.rs"), b"fn main() {}").unwrap();
        fs::write(dir.path().join("node_modules/pkg/index.js"), b"noise").unwrap();
        fs::write(dir.path().join("Cargo.lock"), b"ignored").unwrap();

        let files = snapshot(dir.path(), Duration::from_secs(5)).await.unwrap();
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();

        assert!(paths.contains(&"src/main.rs"));
        assert!(!paths.iter().any(|p| p.starts_with("node_modules")));
        assert!(!paths.contains(&"Cargo.lock"));
    }

    #[tokio::test]
    async fn marks_non_utf8_files_as_binary() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blob.bin"), [0xff, 0xfe, 0x00, 0xff]).unwrap();

        let files = snapshot(dir.path(), Duration::from_secs(5)).await.unwrap();
        let blob = files.iter().find(|f| f.path == "blob.bin").unwrap();
        assert!(blob.is_binary);
        assert!(blob.content.is_none());
    }

    #[tokio::test]
    async fn missing_root_is_scan_failed() {
        let err = snapshot(Path::new("/nonexistent/does-not-exist"), Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, SnapshotError::ScanFailed(_)));
    }
}
