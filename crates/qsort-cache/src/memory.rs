//! In-memory cache backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::backend::CacheBackend;
use crate::error::CacheError;
use crate::key::CacheKey;
use crate::result::ComparisonResult;

/// Process-local, memory-resident cache. Cheap to clone (it's an `Arc`
/// internally via the caller wrapping it) and safe to share across
/// concurrent matches.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<CacheKey, ComparisonResult>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<ComparisonResult>, CacheError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &CacheKey, value: ComparisonResult) -> Result<(), CacheError> {
        self.entries.write().await.insert(key.clone(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsort_core::{Item, RelativeWinner};

    #[tokio::test]
    async fn miss_then_hit_round_trips_the_value() {
        let cache = MemoryCache::new();
        let key = CacheKey::compute(&Item::new("a"), &Item::new("b"), "max");

        assert!(cache.get(&key).await.unwrap().is_none());

        let value = ComparisonResult {
            winner: Some(RelativeWinner::A),
            reasoning: "a is larger".to_string(),
            raw: None,
        };
        cache.put(&key, value).await.unwrap();

        let hit = cache.get(&key).await.unwrap().unwrap();
        assert_eq!(hit.reasoning, "a is larger");
        assert!(matches!(hit.winner, Some(RelativeWinner::A)));
        assert_eq!(cache.len().await, 1);
    }
}
