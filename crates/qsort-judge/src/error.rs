//! Judge adapter errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JudgeError {
    #[error("judge transport error: {0}")]
    Transport(String),

    #[error("judge returned a response that could not be parsed: {0}")]
    MalformedResponse(String),

    #[error("judge call timed out")]
    Timeout,
}
