//! Engine error taxonomy

use thiserror::Error;

/// Everything that can abort a run.
///
/// Configuration variants are reported before any match is played; a
/// `StrategyFailure` aborts the whole run because partial tournament
/// results are not comparable across candidates.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown game '{0}'")]
    UnknownGame(String),

    #[error("rounds must be positive")]
    InvalidRounds,

    #[error("repetitions must be positive")]
    InvalidRepetitions,

    #[error("noise probability {0} is outside [0, 1]")]
    InvalidNoise(f64),

    #[error("duplicate player id '{0}'")]
    DuplicatePlayer(String),

    #[error("tournament needs at least two players, got {0}")]
    NotEnoughPlayers(usize),

    #[error(
        "match '{id}' vs '{opponent}' panicked during decide \
         (repetition {repetition}, stream {stream})"
    )]
    StrategyFailure {
        id: String,
        opponent: String,
        repetition: u32,
        stream: u64,
    },
}
