//! Deterministic judges for tests and demos. None of these call out to a
//! real model; each decides from the presented text alone, with no
//! internal state, so the same `(first, second, criteria)` always yields
//! the same verdict.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use qsort_core::{Item, RelativeWinner};
use qsort_cache::ComparisonResult;

use crate::error::JudgeError;
use crate::LlmJudge;

/// Parses both sides as `f64` and declares the numerically larger one the
/// winner. Falls back to a draw if either side fails to parse, or if the
/// two values are equal.
pub struct NumericJudge;

#[async_trait]
impl LlmJudge for NumericJudge {
    async fn compare(
        &self,
        first: &Item,
        second: &Item,
        _criteria: &str,
    ) -> Result<ComparisonResult, JudgeError> {
        let a: Option<f64> = first.as_str().trim().parse().ok();
        let b: Option<f64> = second.as_str().trim().parse().ok();
        match (a, b) {
            (Some(a), Some(b)) if a > b => Ok(ComparisonResult {
                winner: Some(RelativeWinner::A),
                reasoning: format!("numeric comparison of {:?} and {:?}", first, second),
                raw: None,
            }),
            (Some(a), Some(b)) if b > a => Ok(ComparisonResult {
                winner: Some(RelativeWinner::B),
                reasoning: format!("numeric comparison of {:?} and {:?}", first, second),
                raw: None,
            }),
            _ => Ok(ComparisonResult::undecided(format!(
                "numeric comparison of {:?} and {:?} could not be decided",
                first, second
            ))),
        }
    }
}

/// Declares the lexicographically greater string the winner.
pub struct LexicographicJudge;

#[async_trait]
impl LlmJudge for LexicographicJudge {
    async fn compare(
        &self,
        first: &Item,
        second: &Item,
        _criteria: &str,
    ) -> Result<ComparisonResult, JudgeError> {
        match first.as_str().cmp(second.as_str()) {
            std::cmp::Ordering::Greater => Ok(ComparisonResult {
                winner: Some(RelativeWinner::A),
                reasoning: format!("lexicographic comparison of {:?} and {:?}", first, second),
                raw: None,
            }),
            std::cmp::Ordering::Less => Ok(ComparisonResult {
                winner: Some(RelativeWinner::B),
                reasoning: format!("lexicographic comparison of {:?} and {:?}", first, second),
                raw: None,
            }),
            std::cmp::Ordering::Equal => Ok(ComparisonResult::undecided(format!(
                "{:?} and {:?} are lexicographically equal",
                first, second
            ))),
        }
    }
}

/// Always declares whichever item is presented first the winner,
/// regardless of content. Used to exercise order-alternation logic: a
/// judge with a pure position bias should still converge to a draw once
/// its verdicts are tallied across an even number of alternating rounds.
pub struct AlwaysAJudge;

#[async_trait]
impl LlmJudge for AlwaysAJudge {
    async fn compare(
        &self,
        first: &Item,
        second: &Item,
        _criteria: &str,
    ) -> Result<ComparisonResult, JudgeError> {
        let _ = second;
        Ok(ComparisonResult {
            winner: Some(RelativeWinner::A),
            reasoning: format!("{:?} is presented first", first.as_str()),
            raw: None,
        })
    }
}

/// A deterministic fair coin: the verdict is derived from a hash of
/// `(first, second, criteria)`, so the same question always gets the
/// same answer, but there is no discoverable pattern across questions.
pub struct CoinFlipJudge;

#[async_trait]
impl LlmJudge for CoinFlipJudge {
    async fn compare(
        &self,
        first: &Item,
        second: &Item,
        criteria: &str,
    ) -> Result<ComparisonResult, JudgeError> {
        let mut hasher = Sha256::new();
        hasher.update(first.as_str().as_bytes());
        hasher.update(b"\x1f");
        hasher.update(second.as_str().as_bytes());
        hasher.update(b"\x1f");
        hasher.update(criteria.as_bytes());
        let digest = hasher.finalize();
        let winner = if digest[0] & 1 == 0 {
            Some(RelativeWinner::A)
        } else {
            Some(RelativeWinner::B)
        };
        Ok(ComparisonResult {
            winner,
            reasoning: "coin flip".to_string(),
            raw: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(s: &str) -> Item {
        Item::new(s)
    }

    #[tokio::test]
    async fn numeric_judge_picks_the_larger_value() {
        let judge = NumericJudge;
        let result = judge.compare(&item("3"), &item("10"), "max").await.unwrap();
        assert!(matches!(result.winner, Some(RelativeWinner::B)));
    }

    #[tokio::test]
    async fn numeric_judge_draws_on_unparseable_input() {
        let judge = NumericJudge;
        let result = judge.compare(&item("three"), &item("10"), "max").await.unwrap();
        assert_eq!(result.winner, None);
    }

    #[tokio::test]
    async fn lexicographic_judge_picks_the_greater_string() {
        let judge = LexicographicJudge;
        let result = judge.compare(&item("zebra"), &item("apple"), "az").await.unwrap();
        assert!(matches!(result.winner, Some(RelativeWinner::A)));
    }

    #[tokio::test]
    async fn always_a_judge_ignores_content() {
        let judge = AlwaysAJudge;
        let result = judge.compare(&item("z"), &item("a"), "anything").await.unwrap();
        assert!(matches!(result.winner, Some(RelativeWinner::A)));
    }

    #[tokio::test]
    async fn coin_flip_judge_is_deterministic_per_question() {
        let judge = CoinFlipJudge;
        let first = judge.compare(&item("a"), &item("b"), "max").await.unwrap();
        let second = judge.compare(&item("a"), &item("b"), "max").await.unwrap();
        assert_eq!(first.winner, second.winner);
    }
}
