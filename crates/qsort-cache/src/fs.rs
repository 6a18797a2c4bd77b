//! Filesystem-backed cache: one file per key, JSON-encoded.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::backend::CacheBackend;
use crate::error::CacheError;
use crate::key::CacheKey;
use crate::result::ComparisonResult;

/// One file per cache key under `base_dir`, named by the key's hex digest.
/// Concurrent writers racing on the same key is last-writer-wins.
pub struct FsCache {
    base_dir: PathBuf,
}

impl FsCache {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.base_dir.join(format!("{}.json", key.as_str()))
    }

    async fn ensure_base_dir(&self) -> Result<(), CacheError> {
        tokio::fs::create_dir_all(&self.base_dir).await?;
        Ok(())
    }
}

#[async_trait]
impl CacheBackend for FsCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<ComparisonResult>, CacheError> {
        let path = self.path_for(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn put(&self, key: &CacheKey, value: ComparisonResult) -> Result<(), CacheError> {
        self.ensure_base_dir().await?;
        let path = self.path_for(key);
        let bytes = serde_json::to_vec_pretty(&value)?;
        tokio::fs::write(&path, bytes).await?;
        Ok(())
    }
}

impl AsRef<Path> for FsCache {
    fn as_ref(&self) -> &Path {
        &self.base_dir
    }
}
