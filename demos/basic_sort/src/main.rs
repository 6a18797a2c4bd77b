//! Sorts a handful of numeric strings by "numeric value" using the
//! deterministic numeric mock judge and an in-memory cache.
//!
//! Demonstrates wiring a `CancellationHandle` to a `ctrl_c` signal so the
//! run stops scheduling new matches on interrupt.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use qsort_cache::MemoryCache;
use qsort_core::Item;
use qsort_judge::mock::NumericJudge;
use qsort_engine::{Orchestrator, SortConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let orchestrator = Arc::new(Orchestrator::new(
        Arc::new(NumericJudge),
        Arc::new(MemoryCache::new()),
    ));

    let items = ["1", "2", "3", "4", "5", "6", "7"]
        .into_iter()
        .map(Item::new)
        .collect();

    let mut config = SortConfig::from_env("numeric magnitude");
    config.criteria = "numeric magnitude".to_string();
    config.seed = Some(0);

    let (sort_future, cancellation) = Arc::clone(&orchestrator).sort_cancellable(items, config);
    tokio::pin!(sort_future);

    tokio::select! {
        result = &mut sort_future => {
            print_result(result?);
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("interrupted; stopping after in-flight matches settle");
            cancellation.cancel();
            let result = sort_future.await;
            print_result(result?);
        }
    }

    Ok(())
}

fn print_result(result: qsort_core::SortResult) {
    for (rank, group) in &result.rankings {
        let names: Vec<&str> = group.iter().map(Item::as_str).collect();
        println!("rank {rank}: {names:?}");
    }
    tracing::info!(
        matches = result.statistics.total_matches,
        api_calls = result.statistics.total_api_calls,
        cache_hits = result.statistics.cache_hits,
        elapsed = result.statistics.elapsed_time_seconds,
        "sort complete"
    );
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
