//! Cache errors. Never fatal to the caller: the match runner downgrades
//! any `CacheError` to a miss (on read) or swallows it (on write).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}
