//! Orchestrator (C6): validates input, drives the round loop, emits
//! progress, assembles the final result.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{FuturesUnordered, StreamExt};
use serde_json::json;

use qsort_cache::CacheBackend;
use qsort_core::{Item, SortResult, Statistics, TournamentEngine};
use qsort_judge::LlmJudge;

use crate::config::SortConfig;
use crate::dispatcher::Dispatcher;
use crate::error::SortError;
use crate::events::{dispatch, EventSink, NoopSink, ProgressEvent, ProgressEventType};
use crate::runner::MatchRunner;

/// Cooperative cancellation flag shared between a `CancellationHandle` and
/// the orchestrator's batch loop. Checked at batch boundaries only: a
/// match already in flight is always allowed to settle.
#[derive(Clone)]
pub struct CancellationHandle {
    flag: Arc<AtomicBool>,
}

impl CancellationHandle {
    fn new() -> (Self, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Self {
                flag: Arc::clone(&flag),
            },
            flag,
        )
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

pub struct Orchestrator {
    judge: Arc<dyn LlmJudge>,
    cache: Arc<dyn CacheBackend>,
    sink: Arc<dyn EventSink>,
}

impl Orchestrator {
    pub fn new(judge: Arc<dyn LlmJudge>, cache: Arc<dyn CacheBackend>) -> Self {
        Self {
            judge,
            cache,
            sink: Arc::new(NoopSink),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Runs one `sort` call, returning the final result and a handle the
    /// caller may use to request cooperative cancellation from another
    /// task.
    pub fn sort_cancellable(
        self: Arc<Self>,
        items: Vec<Item>,
        config: SortConfig,
    ) -> (
        impl std::future::Future<Output = Result<SortResult, SortError>>,
        CancellationHandle,
    ) {
        let (handle, flag) = CancellationHandle::new();
        let future = self.sort_with_flag(items, config, flag);
        (future, handle)
    }

    /// Runs one `sort` call to completion with no way to cancel it.
    pub async fn sort(
        self: Arc<Self>,
        items: Vec<Item>,
        config: SortConfig,
    ) -> Result<SortResult, SortError> {
        let flag = Arc::new(AtomicBool::new(false));
        self.sort_with_flag(items, config, flag).await
    }

    async fn sort_with_flag(
        self: Arc<Self>,
        items: Vec<Item>,
        config: SortConfig,
        cancelled: Arc<AtomicBool>,
    ) -> Result<SortResult, SortError> {
        config.validate()?;

        let n = items.len() as u32;
        let estimated_total = estimated_total_matches(n, config.elimination_count);
        let mut engine = TournamentEngine::init(items, config.elimination_count, config.seed)
            .map_err(SortError::Validation)?;

        let dispatcher = Arc::new(Dispatcher::new(config.max_concurrent_requests));
        let runner = Arc::new(MatchRunner::new(
            Arc::clone(&self.judge),
            Arc::clone(&self.cache),
            dispatcher,
        ));

        let start = Instant::now();
        let mut match_history = Vec::new();
        let mut statistics = Statistics::default();

        dispatch(
            &self.sink,
            ProgressEvent {
                event_type: ProgressEventType::RoundEnd,
                message: "starting".to_string(),
                completed: 0,
                total: estimated_total,
                data: None,
            },
        );

        loop {
            if cancelled.load(Ordering::SeqCst) {
                return Err(SortError::Cancelled);
            }
            if engine.is_complete() {
                break;
            }

            let batch = engine.get_next_matches();
            if batch.is_empty() {
                statistics.deadlocked = true;
                dispatch(
                    &self.sink,
                    ProgressEvent {
                        event_type: ProgressEventType::RoundEnd,
                        message: "pairing schedule deadlocked; ending the run".to_string(),
                        completed: statistics.total_matches,
                        total: estimated_total,
                        data: Some(json!({ "deadlock": true })),
                    },
                );
                break;
            }

            tracing::info!(round = batch.len(), "running batch");

            // MatchStart fires up front, in request order, since the whole
            // batch is known before any match runs. MatchEnd and
            // `match_history` follow genuine completion order below — a
            // batch run at `max_concurrent_requests > 1` must be free to
            // finish matches out of submission order.
            for request in &batch {
                dispatch(
                    &self.sink,
                    ProgressEvent {
                        event_type: ProgressEventType::MatchStart,
                        message: format!("{} vs {}", request.a, request.b),
                        completed: 0,
                        total: estimated_total,
                        data: None,
                    },
                );
            }

            let mut in_flight: FuturesUnordered<_> = batch
                .iter()
                .map(|request| {
                    let runner = Arc::clone(&runner);
                    let criteria = config.criteria.clone();
                    let rounds = config.comparison_rounds;
                    let a = request.a.clone();
                    let b = request.b.clone();
                    async move { runner.run(&a, &b, &criteria, rounds).await }
                })
                .collect();

            while let Some((result, counters)) = in_flight.next().await {
                statistics.total_matches += 1;
                statistics.total_api_calls += counters.api_calls;
                statistics.cache_hits += counters.cache_hits;

                engine
                    .record_match_result(&result.item_a, &result.item_b, result.winner.as_ref())
                    .map_err(SortError::Validation)?;

                dispatch(
                    &self.sink,
                    ProgressEvent {
                        event_type: ProgressEventType::MatchEnd,
                        message: format!("{} vs {}", result.item_a, result.item_b),
                        completed: statistics.total_matches,
                        total: estimated_total,
                        data: None,
                    },
                );

                match_history.push(result);
            }
        }

        statistics.elapsed_time_seconds = start.elapsed().as_secs_f64();

        Ok(SortResult {
            rankings: engine.get_rankings(),
            match_history,
            statistics,
        })
    }
}

/// Progress-denominator heuristic only; not a contract. May overshoot or
/// undershoot the schedule's actual match count.
fn estimated_total_matches(n: u32, elimination_count: u32) -> u64 {
    let product = n as u64 * elimination_count as u64;
    (product + 1) / 2
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use qsort_cache::MemoryCache;
    use qsort_core::CoreError;
    use qsort_judge::mock::{AlwaysAJudge, LexicographicJudge, NumericJudge};

    fn orchestrator(judge: Arc<dyn LlmJudge>) -> Arc<Orchestrator> {
        Arc::new(Orchestrator::new(judge, Arc::new(MemoryCache::new())))
    }

    fn items(values: &[&str]) -> Vec<Item> {
        values.iter().map(|v| Item::new(*v)).collect()
    }

    /// Tallies wins/losses per item straight from `match_history`, the way
    /// the tournament engine itself does internally — used here to check
    /// the engine's own win/loss bookkeeping (P2) against the public
    /// result rather than trusting `rankings` alone.
    fn tally(history: &[qsort_core::MatchResult]) -> (HashMap<Item, u32>, HashMap<Item, u32>) {
        let mut wins = HashMap::new();
        let mut losses = HashMap::new();
        for m in history {
            if let Some(winner) = &m.winner {
                let loser = if winner == &m.item_a { &m.item_b } else { &m.item_a };
                *wins.entry(winner.clone()).or_insert(0u32) += 1;
                *losses.entry(loser.clone()).or_insert(0u32) += 1;
            }
        }
        (wins, losses)
    }

    #[tokio::test]
    async fn s1_numeric_judge_ranks_descending() {
        let orch = orchestrator(Arc::new(NumericJudge));
        let mut config = SortConfig::new("max");
        config.elimination_count = 2;
        config.comparison_rounds = 2;
        config.seed = Some(0);
        config.max_concurrent_requests = 1;

        let result = orch.sort(items(&["1", "2", "3", "4"]), config).await.unwrap();

        // "4" is numerically largest under either presentation order, so
        // it never loses a match and always belongs to the top rank.
        assert_eq!(result.rankings[0].0, 1);
        assert!(result.rankings[0].1.contains(&Item::new("4")));

        let (wins, losses) = tally(&result.match_history);
        let total_matches = result.match_history.len() as u32;
        assert_eq!(wins.values().sum::<u32>(), total_matches);
        assert_eq!(losses.values().sum::<u32>(), total_matches);
        for item in ["1", "2", "3", "4"] {
            assert!(losses.get(&Item::new(item)).copied().unwrap_or(0) <= 2);
        }
        // "1" and "2" each have two numerically larger opponents in this
        // set and so are always driven to full elimination; "4" has none.
        assert_eq!(losses[&Item::new("1")], 2);
        assert_eq!(losses[&Item::new("2")], 2);
        assert_eq!(losses.get(&Item::new("4")).copied().unwrap_or(0), 0);

        // "3" can only ever lose to "4", so it can reach at most one loss
        // under the pair-uniqueness rule — by the time the field narrows
        // to "3" and "4" they have already met once, and the schedule
        // deadlocks rather than separating them with a rematch.
        assert!(result.statistics.deadlocked);
    }

    #[tokio::test]
    async fn s2_singleton_completes_with_no_matches() {
        let orch = orchestrator(Arc::new(NumericJudge));
        let mut config = SortConfig::new("max");
        config.seed = Some(0);

        let result = orch.sort(items(&["a"]), config).await.unwrap();

        assert_eq!(result.rankings, vec![(1, vec![Item::new("a")])]);
        assert!(result.match_history.is_empty());
        assert_eq!(result.statistics.total_matches, 0);
    }

    #[tokio::test]
    async fn s3_position_biased_judge_deadlocks_at_rank_one() {
        let orch = orchestrator(Arc::new(AlwaysAJudge));
        let mut config = SortConfig::new("max");
        config.elimination_count = 1;
        config.comparison_rounds = 2;
        config.seed = Some(0);
        config.max_concurrent_requests = 1;

        let result = orch.sort(items(&["x", "y"]), config).await.unwrap();

        assert!(result.statistics.deadlocked);
        assert_eq!(result.rankings.len(), 1);
        assert_eq!(result.rankings[0].0, 1);
    }

    #[tokio::test]
    async fn s4_lexicographic_judge_ranks_r_q_p() {
        let orch = orchestrator(Arc::new(LexicographicJudge));
        let mut config = SortConfig::new("az");
        config.elimination_count = 2;
        config.comparison_rounds = 1;
        config.seed = Some(0);
        config.max_concurrent_requests = 1;

        let result = orch.sort(items(&["p", "q", "r"]), config).await.unwrap();

        assert_eq!(
            result.rankings,
            vec![
                (1, vec![Item::new("r")]),
                (2, vec![Item::new("q")]),
                (3, vec![Item::new("p")]),
            ]
        );

        let (wins, losses) = tally(&result.match_history);
        assert_eq!(wins[&Item::new("r")], 2);
        assert_eq!(losses.get(&Item::new("r")).copied().unwrap_or(0), 0);
        assert_eq!(wins[&Item::new("q")], 1);
        assert_eq!(losses[&Item::new("q")], 1);
        assert_eq!(wins.get(&Item::new("p")).copied().unwrap_or(0), 0);
        assert_eq!(losses[&Item::new("p")], 2);

        // "q" can only ever lose to "r", so the field narrows to "q" and
        // "r" — who have already played — before a decider round can run.
        assert!(result.statistics.deadlocked);
    }

    #[tokio::test]
    async fn s5_repeat_run_reuses_a_shared_cache() {
        let cache = Arc::new(MemoryCache::new());
        let make_orch = || {
            Arc::new(Orchestrator::new(
                Arc::new(NumericJudge) as Arc<dyn LlmJudge>,
                cache.clone() as Arc<dyn CacheBackend>,
            ))
        };

        let mut config = SortConfig::new("max");
        config.elimination_count = 1;
        config.comparison_rounds = 2;
        config.seed = Some(0);
        config.max_concurrent_requests = 1;

        let first = make_orch()
            .sort(items(&["a", "b"]), config.clone())
            .await
            .unwrap();
        assert_eq!(first.statistics.total_api_calls, 2);

        let second = make_orch().sort(items(&["a", "b"]), config).await.unwrap();
        assert_eq!(second.statistics.total_api_calls, 0);
        assert_eq!(second.statistics.cache_hits, 2);
    }

    #[tokio::test]
    async fn rejects_invalid_configuration_before_running_any_match() {
        let orch = orchestrator(Arc::new(NumericJudge));
        let mut config = SortConfig::new("max");
        config.elimination_count = 0;

        let err = orch.sort(items(&["a", "b"]), config).await.unwrap_err();
        assert!(matches!(
            err,
            SortError::Validation(CoreError::InvalidEliminationCount(0))
        ));
    }
}
