//! Noisy iterated-dilemma tournament engine
//!
//! Simulates repeated two-player matrix games under stochastic action
//! noise and ranks generations of candidate strategies by round-robin
//! tournament performance against a fixed benchmark panel. Given one
//! run-level seed, a whole run reproduces exactly.

mod error;
mod game;
mod noise;
mod panel;
mod payoff;
mod random;
mod ranking;
mod strategy;
mod tournament;

pub use error::EngineError;
pub use game::{run_match, MatchConfig, MatchResult};
pub use noise::maybe_flip;
pub use panel::benchmark_panel;
pub use payoff::PayoffMatrix;
pub use random::SeededRng;
pub use ranking::{rank_by_generation, RankEntry, RankList};
pub use strategy::{
    build_strategy, Action, RoundView, Strategy, StrategyKind, StrategyParams,
};
pub use tournament::{
    run_tournament, MatchOutcome, PlayerSpec, Roster, RunConfig, TournamentResult,
};
