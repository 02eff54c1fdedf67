//! Stochastic action flipping
//!
//! Keeps a strategy's *intended* action separate from the *actual* one
//! that gets recorded and observed. Only the actual action ever reaches a
//! history; intended actions are dropped here.

use crate::random::SeededRng;
use crate::strategy::Action;

/// With probability `noise`, record the opposite of the intended action.
///
/// Applied independently to each player's action each round.
pub fn maybe_flip(intended: Action, noise: f64, rng: &mut SeededRng) -> Action {
    if rng.chance(noise) {
        intended.flip()
    } else {
        intended
    }
}
