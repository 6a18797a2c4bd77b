//! The value side of the cache: a judge's answer to one presentation-order
//! comparison question.

use serde::{Deserialize, Serialize};

use qsort_core::RelativeWinner;

/// A judge's answer to one `(first, second, criteria)` question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// `None` means the judge could not decide.
    pub winner: Option<RelativeWinner>,
    pub reasoning: String,
    /// Opaque payload from the judge adapter (e.g. full model response),
    /// round-tripped but never inspected by the cache or the engine.
    pub raw: Option<serde_json::Value>,
}

impl ComparisonResult {
    pub fn undecided(reasoning: impl Into<String>) -> Self {
        Self {
            winner: None,
            reasoning: reasoning.into(),
            raw: None,
        }
    }
}
