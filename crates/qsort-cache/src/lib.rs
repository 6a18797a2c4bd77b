//! Cache facade (C3): order-sensitive memoization of single comparisons.

pub mod backend;
pub mod error;
pub mod fs;
pub mod key;
pub mod memory;
pub mod result;

pub use backend::CacheBackend;
#[cfg(feature = "mock")]
pub use backend::MockCacheBackend;
pub use error::CacheError;
pub use fs::FsCache;
pub use key::CacheKey;
pub use memory::MemoryCache;
pub use result::ComparisonResult;
