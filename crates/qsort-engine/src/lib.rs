//! Match execution pipeline around the tournament engine: runs matches,
//! bounds concurrency, drives the round loop, and emits progress.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod orchestrator;
pub mod runner;

pub use config::SortConfig;
pub use dispatcher::{Dispatcher, SharedDispatcher};
pub use error::{Result, SortError};
pub use events::{ChannelSink, EventSink, FnSink, NoopSink, ProgressEvent, ProgressEventType};
pub use orchestrator::{CancellationHandle, Orchestrator};
pub use runner::{MatchRunner, RunnerCounters};
