//! Match runner (C4): runs `comparison_rounds` rounds between two items,
//! flipping presentation order each round, and tallies a majority winner.

use std::sync::Arc;

use qsort_cache::{CacheBackend, CacheKey, ComparisonResult};
use qsort_core::{Item, MatchResult, PresentationOrder, RelativeWinner, RoundResult};
use qsort_judge::LlmJudge;

use crate::dispatcher::SharedDispatcher;

/// Per-call counters the orchestrator folds into `Statistics`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunnerCounters {
    pub api_calls: u64,
    pub cache_hits: u64,
}

pub struct MatchRunner {
    judge: Arc<dyn LlmJudge>,
    cache: Arc<dyn CacheBackend>,
    dispatcher: SharedDispatcher,
}

impl MatchRunner {
    pub fn new(
        judge: Arc<dyn LlmJudge>,
        cache: Arc<dyn CacheBackend>,
        dispatcher: SharedDispatcher,
    ) -> Self {
        Self {
            judge,
            cache,
            dispatcher,
        }
    }

    /// Runs `comparison_rounds` sequential rounds between `item_a` and
    /// `item_b`. Rounds are sequential, not parallel, so that a cache write
    /// from round `i` is visible to round `i + 1` should the same order
    /// recur.
    #[tracing::instrument(skip(self, criteria), fields(item_a = %item_a, item_b = %item_b))]
    pub async fn run(
        &self,
        item_a: &Item,
        item_b: &Item,
        criteria: &str,
        comparison_rounds: u32,
    ) -> (MatchResult, RunnerCounters) {
        let mut rounds = Vec::with_capacity(comparison_rounds as usize);
        let mut counters = RunnerCounters::default();
        let mut a_round_wins: u32 = 0;
        let mut b_round_wins: u32 = 0;

        for i in 0..comparison_rounds {
            let order = PresentationOrder::for_round(i);
            let (first, second) = match order {
                PresentationOrder::Ab => (item_a, item_b),
                PresentationOrder::Ba => (item_b, item_a),
            };

            let key = CacheKey::compute(first, second, criteria);
            let cached = match self.cache.get(&key).await {
                Ok(hit) => hit,
                Err(error) => {
                    tracing::warn!(%error, "cache read failed; treating as a miss");
                    None
                }
            };

            let (comparison, cached_flag) = if let Some(hit) = cached {
                counters.cache_hits += 1;
                (hit, true)
            } else {
                let _permit = self.dispatcher.acquire().await;
                counters.api_calls += 1;
                let comparison = match self.judge.compare(first, second, criteria).await {
                    Ok(result) => result,
                    Err(error) => {
                        tracing::warn!(%error, round = i, "judge call failed; round is undecided");
                        ComparisonResult {
                            winner: None,
                            reasoning: format!("judge error: {error}"),
                            raw: None,
                        }
                    }
                };

                if let Err(error) = self.cache.put(&key, comparison.clone()).await {
                    tracing::warn!(%error, "cache write failed; continuing without it");
                }

                (comparison, false)
            };

            if let Some(relative) = comparison.winner {
                match (order, relative) {
                    (PresentationOrder::Ab, RelativeWinner::A) => a_round_wins += 1,
                    (PresentationOrder::Ab, RelativeWinner::B) => b_round_wins += 1,
                    (PresentationOrder::Ba, RelativeWinner::A) => b_round_wins += 1,
                    (PresentationOrder::Ba, RelativeWinner::B) => a_round_wins += 1,
                }
            }

            rounds.push(RoundResult {
                order,
                winner: comparison.winner,
                reasoning: comparison.reasoning,
                cached: cached_flag,
            });
        }

        let winner = if a_round_wins > b_round_wins {
            Some(item_a.clone())
        } else if b_round_wins > a_round_wins {
            Some(item_b.clone())
        } else {
            None
        };

        let result = MatchResult {
            item_a: item_a.clone(),
            item_b: item_b.clone(),
            winner,
            rounds,
        };

        (result, counters)
    }
}
