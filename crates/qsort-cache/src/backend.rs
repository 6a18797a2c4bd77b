//! Cache facade trait: order-sensitive memoization of single comparisons.
//! Implementations may suspend on I/O.

use async_trait::async_trait;

use crate::error::CacheError;
use crate::key::CacheKey;
use crate::result::ComparisonResult;

/// A comparison cache. `get`/`put` for distinct keys must be safely
/// interleavable; for the same key, last-writer-wins is acceptable.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Result<Option<ComparisonResult>, CacheError>;
    async fn put(&self, key: &CacheKey, value: ComparisonResult) -> Result<(), CacheError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Verify the trait is object-safe — callers hold it as `Arc<dyn
    // CacheBackend>`.
    fn _assert_object_safe(_: &dyn CacheBackend) {}
}
