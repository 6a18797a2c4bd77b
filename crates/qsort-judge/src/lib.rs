//! Judge adapter contract: the single external collaborator a run depends
//! on to decide a comparison. `qsort-cache` owns `ComparisonResult` since
//! both the judge and the cache need the same value type; this crate
//! re-exports it so callers only need one import.

pub mod error;
pub mod mock;

use async_trait::async_trait;
use qsort_core::Item;
use qsort_cache::ComparisonResult;

pub use error::JudgeError;
pub use qsort_cache::ComparisonResult as JudgeResult;

/// Decides which of two presentation-ordered items better satisfies a
/// criterion. `first`/`second` are already resolved to presentation
/// order — this trait has no notion of an underlying "item_a"/"item_b"
/// identity, only of what is shown first and second.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait LlmJudge: Send + Sync {
    async fn compare(
        &self,
        first: &Item,
        second: &Item,
        criteria: &str,
    ) -> Result<ComparisonResult, JudgeError>;
}
