//! Dispatcher (C5): a semaphore-like gate bounding outbound LLM calls.
//!
//! One `Dispatcher` is created per `sort` call and dropped at its end.
//! Cache-only rounds never touch the gate; only a round that actually
//! calls the judge acquires a permit first.

use std::sync::Arc;

use tokio::sync::{Semaphore, SemaphorePermit};

pub struct Dispatcher {
    gate: Semaphore,
}

impl Dispatcher {
    /// `capacity` is `max_concurrent_requests`; validated by the caller to
    /// be at least 1.
    pub fn new(capacity: u32) -> Self {
        Self {
            gate: Semaphore::new(capacity as usize),
        }
    }

    /// Waits for a free permit. The returned guard releases the permit on
    /// drop, regardless of whether the call it gated succeeded or failed.
    pub async fn acquire(&self) -> SemaphorePermit<'_> {
        self.gate
            .acquire()
            .await
            .expect("dispatcher semaphore is never closed")
    }
}

/// Shared handle used by the match runner and the orchestrator alike.
pub type SharedDispatcher = Arc<Dispatcher>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn never_exceeds_its_capacity() {
        let dispatcher = Arc::new(Dispatcher::new(2));
        let in_flight = Arc::new(AtomicU32::new(0));
        let max_observed = Arc::new(AtomicU32::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let dispatcher = Arc::clone(&dispatcher);
            let in_flight = Arc::clone(&in_flight);
            let max_observed = Arc::clone(&max_observed);
            handles.push(tokio::spawn(async move {
                let _permit = dispatcher.acquire().await;
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                max_observed.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(max_observed.load(Ordering::SeqCst) <= 2);
    }
}
