use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;

use crate::core::{DashboardError, Result};

/// A durable string-keyed payload store.
///
/// Keys map to whole JSON documents; a write fully replaces the previous
/// payload. Reading an absent key is `Ok(None)`, never an error.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<String>>;
    async fn write(&self, key: &str, payload: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// File-per-key backend: each key lives in `<root>/<key>.json`.
///
/// Writes go through a temp file and a rename, so a crash mid-write leaves
/// either the old payload or the new one, never a torn file.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KeyValueBackend for FileBackend {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(DashboardError::Storage(format!(
                "Failed to read '{}': {}",
                path.display(),
                err
            ))),
        }
    }

    async fn write(&self, key: &str, payload: &str) -> Result<()> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|err| {
                DashboardError::Storage(format!(
                    "Failed to create parent directory '{}': {}",
                    parent.display(),
                    err
                ))
            })?;
        }

        let tmp = path.with_extension("tmp");
        fs::write(&tmp, payload).await.map_err(|err| {
            DashboardError::Storage(format!(
                "Failed to write temp file '{}': {}",
                tmp.display(),
                err
            ))
        })?;

        fs::rename(&tmp, &path).await.map_err(|err| {
            DashboardError::Storage(format!(
                "Failed to rename temp file '{}' -> '{}': {}",
                tmp.display(),
                path.display(),
                err
            ))
        })?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(DashboardError::Storage(format!(
                "Failed to remove '{}': {}",
                path.display(),
                err
            ))),
        }
    }
}

/// In-process backend over a shared map. Clones share the same entries,
/// so a reopened dashboard sees what an earlier one persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueBackend for MemoryBackend {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, payload: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
