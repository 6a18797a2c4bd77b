//! Shared data model: items, requests, results and the final sort output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, non-empty piece of text being ranked. Two items in one run must
/// be pairwise distinct by exact text equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item(String);

impl Item {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Item {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Item {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Item {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Presentation order for one round of a match. Part of the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PresentationOrder {
    /// `item_a` presented first.
    Ab,
    /// `item_b` presented first.
    Ba,
}

impl PresentationOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresentationOrder::Ab => "AB",
            PresentationOrder::Ba => "BA",
        }
    }

    /// The order used for 0-based round index `i`: even is AB, odd is BA.
    pub fn for_round(i: u32) -> Self {
        if i % 2 == 0 {
            PresentationOrder::Ab
        } else {
            PresentationOrder::Ba
        }
    }
}

impl fmt::Display for PresentationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side the judge declared as the winner, relative to presentation
/// order — not identity. `None` means the judge could not decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelativeWinner {
    A,
    B,
}

/// An unordered pair of items scheduled together in a given round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRequest {
    pub a: Item,
    pub b: Item,
    pub round: u32,
}

impl MatchRequest {
    pub fn new(a: Item, b: Item, round: u32) -> Self {
        Self { a, b, round }
    }

    /// Unordered key used for the pair-uniqueness invariant.
    pub fn pair_key(&self) -> PairKey {
        PairKey::new(&self.a, &self.b)
    }
}

/// Hashable, order-independent key for a pair of items.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairKey(Item, Item);

impl PairKey {
    pub fn new(a: &Item, b: &Item) -> Self {
        if a.as_str() <= b.as_str() {
            Self(a.clone(), b.clone())
        } else {
            Self(b.clone(), a.clone())
        }
    }
}

/// The outcome of one round within a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundResult {
    pub order: PresentationOrder,
    /// Relative to presentation order; `None` on a judge error or an
    /// undecided comparison.
    pub winner: Option<RelativeWinner>,
    pub reasoning: String,
    pub cached: bool,
}

/// The outcome of a full match (all configured rounds between two items).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub item_a: Item,
    pub item_b: Item,
    /// `None` means a draw: strictly equal decisive round wins (including
    /// the all-errors case).
    pub winner: Option<Item>,
    pub rounds: Vec<RoundResult>,
}

impl MatchResult {
    pub fn pair_key(&self) -> PairKey {
        PairKey::new(&self.item_a, &self.item_b)
    }

    pub fn is_decisive(&self) -> bool {
        self.winner.is_some()
    }
}

/// Aggregate counters describing one `sort` run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub total_matches: u64,
    pub total_api_calls: u64,
    pub cache_hits: u64,
    pub elapsed_time_seconds: f64,
    /// Set when the tournament ended because the pairing schedule could no
    /// longer produce new pairs, rather than by running out of active
    /// participants normally.
    pub deadlocked: bool,
}

/// The final, published output of a `sort` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortResult {
    /// 1-based, dense-skip competition ranking; ties share one rank and
    /// group their items together.
    pub rankings: Vec<(u32, Vec<Item>)>,
    pub match_history: Vec<MatchResult>,
    pub statistics: Statistics,
}
