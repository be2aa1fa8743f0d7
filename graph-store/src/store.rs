//! Filesystem-backed [`GraphStore`]: one JSON file per `(repository, branch)`,
//! written via write-temp-then-rename so a reader never observes a partial
//! file (spec I5/P5: a reader sees `updated_at_old` or `updated_at_new`,
//! never a mix).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex as StdMutex};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex as AsyncMutex;
use tokio::task;
use tracing::{info, instrument, warn};
use trace_model::TraceMap;

use crate::error::StoreError;

/// A persisted traceability map, keyed by `(repository, branch)`.
///
/// Writers take exclusive access per key (spec §5 "the Graph Store is the
/// only shared mutable resource"); reads never block on a writer's
/// in-flight temp file because the rename is the only visible mutation.
pub struct GraphStore {
    root: PathBuf,
    write_locks: StdMutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl GraphStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_locks: StdMutex::new(HashMap::new()),
        }
    }

    #[instrument(skip(self))]
    pub async fn exists(&self, repository: &str, branch: &str) -> Result<bool, StoreError> {
        let path = self.path_for(repository, branch);
        task::spawn_blocking(move || Ok(path.exists()))
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
    }

    /// Returns `None` rather than `NotFound`: callers that need the
    /// baseline-lifecycle distinction (`absent` vs. an error) call `exists`
    /// first or match on `None`.
    #[instrument(skip(self))]
    pub async fn get(&self, repository: &str, branch: &str) -> Result<Option<TraceMap>, StoreError> {
        let path = self.path_for(repository, branch);
        task::spawn_blocking(move || -> Result<Option<TraceMap>, StoreError> {
            if !path.exists() {
                return Ok(None);
            }
            let bytes = std::fs::read(&path).map_err(|e| StoreError::Backend(e.to_string()))?;
            let map: TraceMap =
                serde_json::from_slice(&bytes).map_err(|e| StoreError::Backend(e.to_string()))?;
            Ok(Some(map))
        })
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?
    }

    /// Unconditional atomic full-replace save (Core A's first write, where
    /// there is nothing to conflict with).
    #[instrument(skip(self, map))]
    pub async fn save(&self, map: &TraceMap) -> Result<(), StoreError> {
        self.save_checked(map, None).await
    }

    /// Atomic full-replace save that fails with [`StoreError::Conflict`] if
    /// the on-disk `updated_at` has moved past `observed_updated_at` since
    /// the caller's read (Core B's read-modify-write).
    #[instrument(skip(self, map))]
    pub async fn save_if_unchanged(
        &self,
        map: &TraceMap,
        observed_updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.save_checked(map, Some(observed_updated_at)).await
    }

    async fn save_checked(
        &self,
        map: &TraceMap,
        observed_updated_at: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        let lock = self.lock_for(&map.repository, &map.branch);
        let _guard = lock.lock().await;

        if let Some(observed) = observed_updated_at {
            if let Some(current) = self.get(&map.repository, &map.branch).await? {
                if current.updated_at != observed {
                    warn!(
                        repository = %map.repository,
                        branch = %map.branch,
                        "save rejected: concurrent writer detected"
                    );
                    return Err(StoreError::Conflict {
                        repository: map.repository.clone(),
                        branch: map.branch.clone(),
                    });
                }
            }
        }

        let path = self.path_for(&map.repository, &map.branch);
        let payload =
            serde_json::to_vec_pretty(map).map_err(|e| StoreError::Backend(e.to_string()))?;

        task::spawn_blocking(move || write_atomic(&path, &payload))
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))??;

        info!(repository = %map.repository, branch = %map.branch, "map saved");
        Ok(())
    }

    fn path_for(&self, repository: &str, branch: &str) -> PathBuf {
        self.root
            .join(sanitize(repository))
            .join(format!("{}.json", sanitize(branch)))
    }

    fn lock_for(&self, repository: &str, branch: &str) -> Arc<AsyncMutex<()>> {
        let key = format!("{repository}@{branch}");
        let mut locks = self.write_locks.lock().expect("write_locks poisoned");
        locks
            .entry(key)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }
}

fn sanitize(segment: &str) -> String {
    segment.replace(['/', '\\', ':'], "_")
}

fn write_atomic(path: &Path, payload: &[u8]) -> Result<(), StoreError> {
    let dir = path.parent().ok_or_else(|| {
        StoreError::Backend(format!("path {} has no parent directory", path.display()))
    })?;
    std::fs::create_dir_all(dir).map_err(|e| StoreError::Backend(e.to_string()))?;

    let tmp_path = dir.join(format!(
        ".{}.tmp-{}",
        path.file_name().unwrap_or_default().to_string_lossy(),
        std::process::id()
    ));
    std::fs::write(&tmp_path, payload).map_err(|e| StoreError::Backend(e.to_string()))?;
    std::fs::rename(&tmp_path, path).map_err(|e| StoreError::Backend(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(repository: &str, branch: &str) -> TraceMap {
        TraceMap::new(repository, branch)
    }

    #[tokio::test]
    async fn round_trips_through_save_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = GraphStore::new(dir.path());

        assert!(!store.exists("acme/widgets", "main").await.unwrap());
        let map = sample("acme/widgets", "main");
        store.save(&map).await.unwrap();

        assert!(store.exists("acme/widgets", "main").await.unwrap());
        let loaded = store.get("acme/widgets", "main").await.unwrap().unwrap();
        assert_eq!(loaded, map);
    }

    #[tokio::test]
    async fn save_if_unchanged_rejects_stale_writer() {
        let dir = tempfile::tempdir().unwrap();
        let store = GraphStore::new(dir.path());

        let map = sample("acme/widgets", "main");
        store.save(&map).await.unwrap();
        let stale_read = store.get("acme/widgets", "main").await.unwrap().unwrap();

        let mut newer = stale_read.clone();
        newer.updated_at = chrono::Utc::now() + chrono::Duration::seconds(1);
        store.save_if_unchanged(&newer, stale_read.updated_at).await.unwrap();

        let err = store
            .save_if_unchanged(&stale_read, stale_read.updated_at)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = GraphStore::new(dir.path());
        assert!(store.get("nobody/nothing", "main").await.unwrap().is_none());
    }
}
