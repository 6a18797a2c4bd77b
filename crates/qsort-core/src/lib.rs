//! Core data model and tournament engine for the qualitative sort library.
//!
//! This crate has no I/O and no async runtime dependency: the tournament
//! engine is pure in-memory computation, callable without yielding, per the
//! concurrency model that surrounds it.

pub mod error;
pub mod model;
pub mod participant;
pub mod tournament;

pub use error::{CoreError, Result};
pub use model::{
    Item, MatchRequest, MatchResult, PairKey, PresentationOrder, RelativeWinner, RoundResult,
    SortResult, Statistics,
};
pub use participant::Participant;
pub use tournament::TournamentEngine;
