//! Event bus (C7): delivers structured progress events to a user-provided
//! sink. Delivery is synchronous from the orchestrator's thread of control;
//! a sink that panics is caught and logged, never allowed to abort a run.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressEventType {
    MatchStart,
    MatchEnd,
    RoundEnd,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    #[serde(rename = "type")]
    pub event_type: ProgressEventType,
    pub message: String,
    pub completed: u64,
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// A progress sink. Must not block the orchestrator for long; implementors
/// that need to do real work should hand events off to a queue.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// Discards every event. The default when the caller supplies none.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: ProgressEvent) {}
}

/// Forwards events onto an unbounded `tokio::sync::mpsc` channel. Never
/// blocks; a dropped receiver silently discards further events.
#[derive(Clone)]
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<ProgressEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: ProgressEvent) {
        let _ = self.sender.send(event);
    }
}

/// Wraps a plain closure as an `EventSink`.
pub struct FnSink<F>(F)
where
    F: Fn(ProgressEvent) + Send + Sync;

impl<F> FnSink<F>
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> EventSink for FnSink<F>
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    fn emit(&self, event: ProgressEvent) {
        (self.0)(event)
    }
}

/// Delivers an event to `sink`, catching and logging any panic raised by
/// the sink rather than letting it unwind into the orchestrator's loop.
pub(crate) fn dispatch(sink: &Arc<dyn EventSink>, event: ProgressEvent) {
    let sink = Arc::clone(sink);
    let result = catch_unwind(AssertUnwindSafe(|| sink.emit(event)));
    if let Err(panic) = result {
        let message = panic
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        tracing::warn!(panic = %message, "progress sink panicked; continuing the run");
    }
}
