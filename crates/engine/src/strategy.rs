//! Strategy contract and factory

use serde::{Deserialize, Serialize};

use crate::panel;
use crate::payoff::PayoffMatrix;
use crate::random::SeededRng;

/// A move in one round of the game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Cooperate,
    Defect,
}

impl Action {
    /// The opposite action
    pub fn flip(self) -> Self {
        match self {
            Action::Cooperate => Action::Defect,
            Action::Defect => Action::Cooperate,
        }
    }
}

/// What a strategy sees each round.
///
/// Histories contain only *actual* recorded actions: a cooperation that
/// noise flipped to a defection is indistinguishable here from a
/// deliberate defection. Strategies that want to forgive apparent noise
/// must infer it heuristically from these views.
#[derive(Clone, Copy, Debug)]
pub struct RoundView<'a> {
    pub own_history: &'a [Action],
    pub opponent_history: &'a [Action],
    pub own_score: i64,
    pub opponent_score: i64,
    pub round: u32,
    pub total_rounds: u32,
    pub payoffs: &'a PayoffMatrix,
}

/// A stateful decision rule. One fresh instance plays each side of a match.
///
/// `decide` must be deterministic given the same view, internal state and
/// RNG — no wall-clock or I/O. Randomness comes only from the supplied
/// generator so matches replay exactly from their seed.
pub trait Strategy: Send {
    /// Restore initial internal state. Called before every match, so no
    /// memory leaks between matches or opponents.
    fn reset(&mut self) {}

    /// Choose the intended action for this round. Noise may still flip it
    /// before it is recorded.
    fn decide(&mut self, view: &RoundView<'_>, rng: &mut SeededRng) -> Action;
}

/// Base decision rule selected by a registry entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Copy opponent's last move. Start with cooperate.
    TitForTat,
    /// Always defect, never cooperate.
    AlwaysDefect,
    /// Always cooperate, never defect.
    AlwaysCooperate,
    /// Cooperate until opponent defects once too often, then always defect.
    GrimTrigger,
    /// Win-stay, lose-switch. Repeat move if good outcome.
    Pavlov,
    /// Tit-for-Tat but start with defect.
    SuspiciousTitForTat,
    /// Random choice each round.
    Random,
    /// Defect only if opponent defected twice in a row.
    TitForTwoTats,
    /// Retaliate with increasing defection streaks, then forgive.
    Gradual,
    /// Fixed repeating pattern, ignores the opponent entirely.
    Cyclical,
}

/// Strategy parameters for fine-tuning behavior
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyParams {
    /// Percentage chance to cooperate after opponent defects (0-100)
    pub forgiveness: u8,
    /// Rounds to wait before retaliating (0-10)
    pub retaliation_delay: u8,
    /// Number of defections to ignore before retaliating (0-5)
    pub noise_tolerance: u8,
    /// Bitmask of first 8 moves (1 = defect, 0 = use strategy)
    pub initial_moves: u8,
    /// Bias toward cooperation for Random strategy (0-100)
    pub cooperate_bias: u8,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            forgiveness: 0,
            retaliation_delay: 0,
            noise_tolerance: 0,
            initial_moves: 0,
            cooperate_bias: 50,
        }
    }
}

/// Build a fresh strategy instance for one match
pub fn build_strategy(kind: StrategyKind, params: &StrategyParams) -> Box<dyn Strategy> {
    let inner: Box<dyn Strategy> = match kind {
        StrategyKind::TitForTat => Box::new(panel::TitForTat::new(params)),
        StrategyKind::AlwaysDefect => Box::new(panel::AlwaysDefect),
        StrategyKind::AlwaysCooperate => Box::new(panel::AlwaysCooperate),
        StrategyKind::GrimTrigger => Box::new(panel::GrimTrigger::new(params)),
        StrategyKind::Pavlov => Box::new(panel::Pavlov),
        StrategyKind::SuspiciousTitForTat => Box::new(panel::SuspiciousTitForTat::new(params)),
        StrategyKind::Random => Box::new(panel::Random::new(params)),
        StrategyKind::TitForTwoTats => Box::new(panel::TitForTwoTats),
        StrategyKind::Gradual => Box::new(panel::Gradual::new()),
        StrategyKind::Cyclical => Box::new(panel::Cyclical::new()),
    };

    if params.initial_moves != 0 {
        Box::new(panel::OpeningBook::new(params.initial_moves, inner))
    } else {
        inner
    }
}
