//! Match execution engine

use serde::{Deserialize, Serialize};

use crate::noise::maybe_flip;
use crate::payoff::PayoffMatrix;
use crate::random::SeededRng;
use crate::strategy::{Action, RoundView, Strategy};

/// Per-match configuration, shared read-only across concurrent matches
#[derive(Clone, Copy, Debug)]
pub struct MatchConfig {
    pub rounds: u32,
    pub noise: f64,
    pub payoffs: PayoffMatrix,
}

/// Result of a complete match
///
/// Immutable once produced. Histories hold the actual recorded actions;
/// `stream` plus the run seed reproduces the match exactly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchResult {
    pub score_a: i64,
    pub score_b: i64,
    pub history_a: Vec<Action>,
    pub history_b: Vec<Action>,
    pub stream: u64,
    pub repetition: u32,
}

/// Run a complete match between two strategies
///
/// Both strategies are reset to initial state first. Each round: both
/// sides decide from actual histories, each intended action passes
/// independently through the noise source, the actual pair is recorded
/// and scored. `rounds == 0` yields empty histories and zero scores.
pub fn run_match(
    a: &mut dyn Strategy,
    b: &mut dyn Strategy,
    config: &MatchConfig,
    seed: u64,
    stream: u64,
    repetition: u32,
) -> MatchResult {
    a.reset();
    b.reset();

    let rng = SeededRng::new(seed, stream);

    let mut history_a: Vec<Action> = Vec::with_capacity(config.rounds as usize);
    let mut history_b: Vec<Action> = Vec::with_capacity(config.rounds as usize);
    let mut score_a = 0i64;
    let mut score_b = 0i64;

    for round in 0..config.rounds {
        // Per-round RNG for each player, so neither's draws shift the other's
        let mut rng_a = rng.for_round(round as u64 * 2);
        let mut rng_b = rng.for_round(round as u64 * 2 + 1);

        let view_a = RoundView {
            own_history: &history_a,
            opponent_history: &history_b,
            own_score: score_a,
            opponent_score: score_b,
            round,
            total_rounds: config.rounds,
            payoffs: &config.payoffs,
        };
        let view_b = RoundView {
            own_history: &history_b,
            opponent_history: &history_a,
            own_score: score_b,
            opponent_score: score_a,
            round,
            total_rounds: config.rounds,
            payoffs: &config.payoffs,
        };

        let intended_a = a.decide(&view_a, &mut rng_a);
        let intended_b = b.decide(&view_b, &mut rng_b);

        // Only the post-noise action is recorded or ever observed
        let actual_a = maybe_flip(intended_a, config.noise, &mut rng_a);
        let actual_b = maybe_flip(intended_b, config.noise, &mut rng_b);

        let (points_a, points_b) = config.payoffs.score(actual_a, actual_b);
        score_a += points_a;
        score_b += points_b;

        history_a.push(actual_a);
        history_b.push(actual_b);
    }

    MatchResult {
        score_a,
        score_b,
        history_a,
        history_b,
        stream,
        repetition,
    }
}
