//! Payoff model
//!
//! The engine reads whatever matrix is configured; nothing here assumes
//! the standard Prisoner's Dilemma ordering.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::strategy::Action;

/// Payoff table over the four ordered action pairs.
///
/// Each cell is `(own score, other score)` from the row player's point of
/// view, so `score(a, b).0 == score(b, a).1` holds by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffMatrix {
    /// Both cooperate
    pub cc: (i64, i64),
    /// Self cooperates, other defects
    pub cd: (i64, i64),
    /// Self defects, other cooperates
    pub dc: (i64, i64),
    /// Both defect
    pub dd: (i64, i64),
}

impl PayoffMatrix {
    /// The classic Prisoner's Dilemma table
    pub fn classic() -> Self {
        Self {
            cc: (3, 3),
            cd: (0, 5),
            dc: (5, 0),
            dd: (1, 1),
        }
    }

    /// A softer variant: higher reward for mutual cooperation, milder
    /// punishment for mutual defection
    pub fn generous() -> Self {
        Self {
            cc: (4, 4),
            cd: (0, 5),
            dc: (5, 0),
            dd: (2, 2),
        }
    }

    /// Look up the matrix for a named game
    pub fn for_game(name: &str) -> Result<Self, EngineError> {
        match name {
            "classic" => Ok(Self::classic()),
            "generous" => Ok(Self::generous()),
            _ => Err(EngineError::UnknownGame(name.to_string())),
        }
    }

    /// Score one round. Pure, total over all four combinations.
    pub fn score(&self, own: Action, other: Action) -> (i64, i64) {
        match (own, other) {
            (Action::Cooperate, Action::Cooperate) => self.cc,
            (Action::Cooperate, Action::Defect) => self.cd,
            (Action::Defect, Action::Cooperate) => self.dc,
            (Action::Defect, Action::Defect) => self.dd,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_table() {
        let m = PayoffMatrix::classic();
        assert_eq!(m.score(Action::Cooperate, Action::Cooperate), (3, 3));
        assert_eq!(m.score(Action::Cooperate, Action::Defect), (0, 5));
        assert_eq!(m.score(Action::Defect, Action::Cooperate), (5, 0));
        assert_eq!(m.score(Action::Defect, Action::Defect), (1, 1));
    }

    #[test]
    fn test_symmetry() {
        for m in [PayoffMatrix::classic(), PayoffMatrix::generous()] {
            for a in [Action::Cooperate, Action::Defect] {
                for b in [Action::Cooperate, Action::Defect] {
                    assert_eq!(m.score(a, b).0, m.score(b, a).1);
                    assert_eq!(m.score(a, b).1, m.score(b, a).0);
                }
            }
        }
    }

    #[test]
    fn test_for_game() {
        assert_eq!(PayoffMatrix::for_game("classic").unwrap(), PayoffMatrix::classic());
        assert_eq!(PayoffMatrix::for_game("generous").unwrap(), PayoffMatrix::generous());
    }

    #[test]
    fn test_unknown_game() {
        let err = PayoffMatrix::for_game("chicken").unwrap_err();
        assert!(matches!(err, EngineError::UnknownGame(name) if name == "chicken"));
    }
}
