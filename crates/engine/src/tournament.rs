//! Tournament scheduling and execution
//!
//! Matches are independent units of work: each one owns its two fresh
//! strategy instances, its state and its RNG stream, so they dispatch to
//! a worker pool without shared mutable state. Stream indices depend only
//! on the schedule, never on completion order, so a run reproduces
//! end-to-end from its single seed.

use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::error::EngineError;
use crate::game::{run_match, MatchConfig, MatchResult};
use crate::payoff::PayoffMatrix;
use crate::strategy::{build_strategy, Strategy, StrategyKind, StrategyParams};

/// Run-level configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunConfig {
    /// Payoff matrix selector
    pub game: String,
    /// Rounds per match
    pub rounds: u32,
    /// Probability that a played action is recorded flipped
    pub noise: f64,
    /// Matches per pairing
    pub repetitions: u32,
    /// Run-level seed; every match stream derives from it
    pub seed: u64,
}

impl RunConfig {
    /// Reject bad configuration before any match runs
    pub fn validate(&self) -> Result<PayoffMatrix, EngineError> {
        if self.rounds == 0 {
            return Err(EngineError::InvalidRounds);
        }
        if self.repetitions == 0 {
            return Err(EngineError::InvalidRepetitions);
        }
        if !(0.0..=1.0).contains(&self.noise) {
            return Err(EngineError::InvalidNoise(self.noise));
        }
        PayoffMatrix::for_game(&self.game)
    }
}

/// One entry in the tournament population
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub id: String,
    /// Candidate family index; benchmark panel members have none
    pub generation: Option<u32>,
    /// Display metadata, never consulted by ranking
    pub label: String,
    pub kind: StrategyKind,
    #[serde(default)]
    pub params: StrategyParams,
}

/// Ordered population for one run. Order is load-bearing: it breaks
/// ranking ties and fixes the stream indices.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    players: Vec<PlayerSpec>,
}

impl Roster {
    pub fn new(players: Vec<PlayerSpec>) -> Result<Self, EngineError> {
        let mut seen = HashSet::new();
        for player in &players {
            if !seen.insert(player.id.as_str()) {
                return Err(EngineError::DuplicatePlayer(player.id.clone()));
            }
        }
        Ok(Self { players })
    }

    pub fn players(&self) -> &[PlayerSpec] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// A completed match keyed by roster indices
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub player_a: usize,
    pub player_b: usize,
    pub repetition: u32,
    pub result: MatchResult,
}

/// All matches of one run; immutable once produced
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TournamentResult {
    pub outcomes: Vec<MatchOutcome>,
}

#[derive(Clone, Copy, Debug)]
struct MatchJob {
    a: usize,
    b: usize,
    repetition: u32,
    stream: u64,
}

/// Every unordered pair of distinct players, `repetitions` times each.
/// The stream index is a pure function of pair ordinal and repetition.
fn schedule(player_count: usize, repetitions: u32) -> Vec<MatchJob> {
    let mut jobs = Vec::new();
    let mut pair_ordinal = 0u64;
    for a in 0..player_count {
        for b in (a + 1)..player_count {
            for repetition in 0..repetitions {
                jobs.push(MatchJob {
                    a,
                    b,
                    repetition,
                    stream: pair_ordinal * repetitions as u64 + repetition as u64,
                });
            }
            pair_ordinal += 1;
        }
    }
    jobs
}

/// Run one scheduled match, converting a strategy panic into a hard
/// error carrying enough context to reproduce it
fn play_match(
    a: &mut dyn Strategy,
    b: &mut dyn Strategy,
    id_a: &str,
    id_b: &str,
    config: &MatchConfig,
    seed: u64,
    stream: u64,
    repetition: u32,
) -> Result<MatchResult, EngineError> {
    catch_unwind(AssertUnwindSafe(|| {
        run_match(a, b, config, seed, stream, repetition)
    }))
    .map_err(|_| EngineError::StrategyFailure {
        id: id_a.to_string(),
        opponent: id_b.to_string(),
        repetition,
        stream,
    })
}

/// Run the full round-robin tournament
///
/// Aborts on the first failed match: partial results are not comparable
/// across candidates, so nothing is returned unless every match finished.
pub fn run_tournament(
    roster: &Roster,
    config: &RunConfig,
) -> Result<TournamentResult, EngineError> {
    let payoffs = config.validate()?;
    if roster.len() < 2 {
        return Err(EngineError::NotEnoughPlayers(roster.len()));
    }

    let match_config = MatchConfig {
        rounds: config.rounds,
        noise: config.noise,
        payoffs,
    };
    let jobs = schedule(roster.len(), config.repetitions);

    info!(
        players = roster.len(),
        matches = jobs.len(),
        game = %config.game,
        rounds = config.rounds,
        noise = config.noise,
        seed = config.seed,
        "starting tournament"
    );

    let outcomes: Result<Vec<MatchOutcome>, EngineError> = jobs
        .par_iter()
        .map(|job| {
            let spec_a = &roster.players()[job.a];
            let spec_b = &roster.players()[job.b];
            let mut player_a = build_strategy(spec_a.kind, &spec_a.params);
            let mut player_b = build_strategy(spec_b.kind, &spec_b.params);

            let result = play_match(
                player_a.as_mut(),
                player_b.as_mut(),
                &spec_a.id,
                &spec_b.id,
                &match_config,
                config.seed,
                job.stream,
                job.repetition,
            )?;

            trace!(
                a = %spec_a.id,
                b = %spec_b.id,
                repetition = job.repetition,
                score_a = result.score_a,
                score_b = result.score_b,
                "match finished"
            );

            Ok(MatchOutcome {
                player_a: job.a,
                player_b: job.b,
                repetition: job.repetition,
                result,
            })
        })
        .collect();

    let outcomes = outcomes?;
    info!(matches = outcomes.len(), "tournament complete");

    Ok(TournamentResult { outcomes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{Action, RoundView};

    fn candidate(id: &str, generation: u32, kind: StrategyKind) -> PlayerSpec {
        PlayerSpec {
            id: id.to_string(),
            generation: Some(generation),
            label: String::new(),
            kind,
            params: StrategyParams::default(),
        }
    }

    fn small_roster() -> Roster {
        Roster::new(vec![
            candidate("coop", 1, StrategyKind::AlwaysCooperate),
            candidate("defect", 1, StrategyKind::AlwaysDefect),
            candidate("tft", 2, StrategyKind::TitForTat),
        ])
        .unwrap()
    }

    fn run_config() -> RunConfig {
        RunConfig {
            game: "classic".to_string(),
            rounds: 20,
            noise: 0.0,
            repetitions: 3,
            seed: 42,
        }
    }

    #[test]
    fn test_validate_rejects_zero_rounds() {
        let config = RunConfig {
            rounds: 0,
            ..run_config()
        };
        assert!(matches!(config.validate(), Err(EngineError::InvalidRounds)));
    }

    #[test]
    fn test_validate_rejects_zero_repetitions() {
        let config = RunConfig {
            repetitions: 0,
            ..run_config()
        };
        assert!(matches!(config.validate(), Err(EngineError::InvalidRepetitions)));
    }

    #[test]
    fn test_validate_rejects_bad_noise() {
        for noise in [-0.1, 1.5, f64::NAN] {
            let config = RunConfig {
                noise,
                ..run_config()
            };
            assert!(
                matches!(config.validate(), Err(EngineError::InvalidNoise(_))),
                "noise {} accepted",
                noise
            );
        }
    }

    #[test]
    fn test_validate_rejects_unknown_game() {
        let config = RunConfig {
            game: "stag_hunt".to_string(),
            ..run_config()
        };
        assert!(matches!(config.validate(), Err(EngineError::UnknownGame(_))));
    }

    #[test]
    fn test_roster_rejects_duplicate_ids() {
        let err = Roster::new(vec![
            candidate("same", 1, StrategyKind::TitForTat),
            candidate("same", 2, StrategyKind::Pavlov),
        ])
        .unwrap_err();
        assert!(matches!(err, EngineError::DuplicatePlayer(id) if id == "same"));
    }

    #[test]
    fn test_too_few_players() {
        let roster = Roster::new(vec![candidate("solo", 1, StrategyKind::TitForTat)]).unwrap();
        let err = run_tournament(&roster, &run_config()).unwrap_err();
        assert!(matches!(err, EngineError::NotEnoughPlayers(1)));
    }

    #[test]
    fn test_schedule_counts() {
        // C(n, 2) pairs, each repeated `repetitions` times
        let jobs = schedule(5, 4);
        assert_eq!(jobs.len(), 10 * 4);

        // Stream indices are unique across the whole schedule
        let mut streams: Vec<_> = jobs.iter().map(|j| j.stream).collect();
        streams.sort_unstable();
        streams.dedup();
        assert_eq!(streams.len(), 40);
    }

    #[test]
    fn test_every_pair_played() {
        let roster = small_roster();
        let config = run_config();
        let result = run_tournament(&roster, &config).unwrap();

        assert_eq!(result.outcomes.len(), 3 * config.repetitions as usize);
        for a in 0..3 {
            for b in (a + 1)..3 {
                let count = result
                    .outcomes
                    .iter()
                    .filter(|o| o.player_a == a && o.player_b == b)
                    .count();
                assert_eq!(count, config.repetitions as usize, "pair ({}, {})", a, b);
            }
        }
    }

    #[test]
    fn test_no_self_matches() {
        let result = run_tournament(&small_roster(), &run_config()).unwrap();
        for outcome in &result.outcomes {
            assert_ne!(outcome.player_a, outcome.player_b);
        }
    }

    #[test]
    fn test_tournament_determinism() {
        let roster = small_roster();
        let config = RunConfig {
            noise: 0.1,
            ..run_config()
        };

        let r1 = run_tournament(&roster, &config).unwrap();
        let r2 = run_tournament(&roster, &config).unwrap();

        assert_eq!(
            serde_json::to_string(&r1).unwrap(),
            serde_json::to_string(&r2).unwrap()
        );
    }

    #[test]
    fn test_different_seeds_differ() {
        let roster = Roster::new(vec![
            candidate("r1", 1, StrategyKind::Random),
            candidate("r2", 1, StrategyKind::Random),
        ])
        .unwrap();
        let config = run_config();
        let other = RunConfig {
            seed: 43,
            ..run_config()
        };

        let r1 = run_tournament(&roster, &config).unwrap();
        let r2 = run_tournament(&roster, &other).unwrap();

        assert_ne!(
            serde_json::to_string(&r1).unwrap(),
            serde_json::to_string(&r2).unwrap()
        );
    }

    #[test]
    fn test_known_scores_no_noise() {
        // coop vs defect over 20 rounds, classic matrix: 0 vs 100 per match
        let result = run_tournament(&small_roster(), &run_config()).unwrap();
        let outcome = result
            .outcomes
            .iter()
            .find(|o| o.player_a == 0 && o.player_b == 1)
            .unwrap();

        assert_eq!(outcome.result.score_a, 0);
        assert_eq!(outcome.result.score_b, 100);
    }

    struct Panicker;

    impl Strategy for Panicker {
        fn decide(&mut self, _view: &RoundView<'_>, _rng: &mut crate::random::SeededRng) -> Action {
            panic!("contract violation");
        }
    }

    #[test]
    fn test_strategy_panic_becomes_error() {
        let mut bad = Panicker;
        let mut good = crate::panel::AlwaysCooperate;
        let config = MatchConfig {
            rounds: 5,
            noise: 0.0,
            payoffs: PayoffMatrix::classic(),
        };

        let err = play_match(&mut bad, &mut good, "bad", "good", &config, 42, 0, 0).unwrap_err();
        match err {
            EngineError::StrategyFailure {
                id,
                opponent,
                repetition,
                stream,
            } => {
                assert_eq!(id, "bad");
                assert_eq!(opponent, "good");
                assert_eq!(repetition, 0);
                assert_eq!(stream, 0);
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
