//! Benchmark strategy implementations
//!
//! The fixed reference panel every candidate is measured against, plus
//! the parameterized building blocks candidates are assembled from. All
//! of these see only actual (possibly noise-flipped) history, so the
//! noise-tolerance and forgiveness knobs exist to avoid retaliation
//! spirals triggered by a single flipped action.

use crate::random::SeededRng;
use crate::strategy::{Action, RoundView, Strategy, StrategyKind, StrategyParams};
use crate::tournament::PlayerSpec;

/// Copy opponent's last move, start with cooperate.
///
/// `forgiveness` gives a percentage chance to pardon a defection;
/// `retaliation_delay` holds fire for N rounds after one.
pub struct TitForTat {
    forgiveness: u8,
    retaliation_delay: u8,
}

impl TitForTat {
    pub fn new(params: &StrategyParams) -> Self {
        Self {
            forgiveness: params.forgiveness,
            retaliation_delay: params.retaliation_delay,
        }
    }
}

impl Strategy for TitForTat {
    fn decide(&mut self, view: &RoundView<'_>, rng: &mut SeededRng) -> Action {
        match view.opponent_history.last() {
            None => Action::Cooperate,
            Some(Action::Cooperate) => Action::Cooperate,
            Some(Action::Defect) => {
                retaliate(view.opponent_history, self.retaliation_delay, self.forgiveness, rng)
            }
        }
    }
}

/// Shared retaliation logic for the tit-for-tat family
fn retaliate(
    opponent_history: &[Action],
    retaliation_delay: u8,
    forgiveness: u8,
    rng: &mut SeededRng,
) -> Action {
    // Retaliation delay: wait N rounds after seeing a defection
    if retaliation_delay > 0 {
        if let Some(pos) = opponent_history.iter().rposition(|m| *m == Action::Defect) {
            let rounds_since = opponent_history.len() - 1 - pos;
            if rounds_since < retaliation_delay as usize {
                return Action::Cooperate;
            }
        }
    }
    // Forgiveness: chance to cooperate anyway
    if forgiveness > 0 && rng.next_percent() < forgiveness {
        Action::Cooperate
    } else {
        Action::Defect
    }
}

/// Never cooperates
pub struct AlwaysDefect;

impl Strategy for AlwaysDefect {
    fn decide(&mut self, _view: &RoundView<'_>, _rng: &mut SeededRng) -> Action {
        Action::Defect
    }
}

/// Never defects
pub struct AlwaysCooperate;

impl Strategy for AlwaysCooperate {
    fn decide(&mut self, _view: &RoundView<'_>, _rng: &mut SeededRng) -> Action {
        Action::Cooperate
    }
}

/// Cooperate until opponent defects more than `noise_tolerance` times,
/// then defect forever. The trigger is latched internal state.
pub struct GrimTrigger {
    tolerance: u8,
    triggered: bool,
}

impl GrimTrigger {
    pub fn new(params: &StrategyParams) -> Self {
        Self {
            tolerance: params.noise_tolerance,
            triggered: false,
        }
    }
}

impl Strategy for GrimTrigger {
    fn reset(&mut self) {
        self.triggered = false;
    }

    fn decide(&mut self, view: &RoundView<'_>, _rng: &mut SeededRng) -> Action {
        if !self.triggered {
            let defections = view
                .opponent_history
                .iter()
                .filter(|m| **m == Action::Defect)
                .count();
            if defections > self.tolerance as usize {
                self.triggered = true;
            }
        }

        if self.triggered {
            Action::Defect
        } else {
            Action::Cooperate
        }
    }
}

/// Win-stay, lose-switch: repeat the last move if it scored at least the
/// mutual-cooperation reward, otherwise switch.
pub struct Pavlov;

impl Strategy for Pavlov {
    fn decide(&mut self, view: &RoundView<'_>, _rng: &mut SeededRng) -> Action {
        let (Some(&my_last), Some(&opp_last)) =
            (view.own_history.last(), view.opponent_history.last())
        else {
            return Action::Cooperate;
        };

        let (last_score, _) = view.payoffs.score(my_last, opp_last);
        let (reward, _) = view.payoffs.score(Action::Cooperate, Action::Cooperate);

        if last_score >= reward {
            my_last
        } else {
            my_last.flip()
        }
    }
}

/// Tit-for-Tat that opens with defect
pub struct SuspiciousTitForTat {
    forgiveness: u8,
    retaliation_delay: u8,
}

impl SuspiciousTitForTat {
    pub fn new(params: &StrategyParams) -> Self {
        Self {
            forgiveness: params.forgiveness,
            retaliation_delay: params.retaliation_delay,
        }
    }
}

impl Strategy for SuspiciousTitForTat {
    fn decide(&mut self, view: &RoundView<'_>, rng: &mut SeededRng) -> Action {
        match view.opponent_history.last() {
            None => Action::Defect,
            Some(Action::Cooperate) => Action::Cooperate,
            Some(Action::Defect) => {
                retaliate(view.opponent_history, self.retaliation_delay, self.forgiveness, rng)
            }
        }
    }
}

/// Biased coin flip each round
pub struct Random {
    cooperate_bias: u8,
}

impl Random {
    pub fn new(params: &StrategyParams) -> Self {
        Self {
            cooperate_bias: params.cooperate_bias,
        }
    }
}

impl Strategy for Random {
    fn decide(&mut self, _view: &RoundView<'_>, rng: &mut SeededRng) -> Action {
        if rng.next_percent() < self.cooperate_bias {
            Action::Cooperate
        } else {
            Action::Defect
        }
    }
}

/// Defect only after two consecutive opponent defections
pub struct TitForTwoTats;

impl Strategy for TitForTwoTats {
    fn decide(&mut self, view: &RoundView<'_>, _rng: &mut SeededRng) -> Action {
        let history = view.opponent_history;
        if history.len() < 2 {
            return Action::Cooperate;
        }

        let last_two = &history[history.len() - 2..];
        if last_two[0] == Action::Defect && last_two[1] == Action::Defect {
            Action::Defect
        } else {
            Action::Cooperate
        }
    }
}

/// Escalating retaliation: the Nth observed defection earns a streak of N
/// punishing defections, then cooperation resumes.
///
/// Keeps a private punishment ledger; the shared history never records
/// what was owed, only what was played.
pub struct Gradual {
    owed: u64,
    provocations: u64,
    seen: usize,
}

impl Gradual {
    pub fn new() -> Self {
        Self {
            owed: 0,
            provocations: 0,
            seen: 0,
        }
    }
}

impl Default for Gradual {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Gradual {
    fn reset(&mut self) {
        self.owed = 0;
        self.provocations = 0;
        self.seen = 0;
    }

    fn decide(&mut self, view: &RoundView<'_>, _rng: &mut SeededRng) -> Action {
        // Register defections observed since the last call
        for action in &view.opponent_history[self.seen..] {
            if *action == Action::Defect {
                self.provocations += 1;
                self.owed += self.provocations;
            }
        }
        self.seen = view.opponent_history.len();

        if self.owed > 0 {
            self.owed -= 1;
            Action::Defect
        } else {
            Action::Cooperate
        }
    }
}

/// Plays C, C, D on repeat regardless of the opponent
pub struct Cyclical {
    pattern: [Action; 3],
}

impl Cyclical {
    pub fn new() -> Self {
        Self {
            pattern: [Action::Cooperate, Action::Cooperate, Action::Defect],
        }
    }
}

impl Default for Cyclical {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Cyclical {
    fn decide(&mut self, view: &RoundView<'_>, _rng: &mut SeededRng) -> Action {
        self.pattern[view.round as usize % self.pattern.len()]
    }
}

/// Overrides the first eight rounds with a defect bitmask, then delegates
pub struct OpeningBook {
    mask: u8,
    inner: Box<dyn Strategy>,
}

impl OpeningBook {
    pub fn new(mask: u8, inner: Box<dyn Strategy>) -> Self {
        Self { mask, inner }
    }
}

impl Strategy for OpeningBook {
    fn reset(&mut self) {
        self.inner.reset();
    }

    fn decide(&mut self, view: &RoundView<'_>, rng: &mut SeededRng) -> Action {
        if view.round < 8 && (self.mask >> view.round) & 1 == 1 {
            return Action::Defect;
        }
        self.inner.decide(view, rng)
    }
}

/// The fixed reference panel supplied to every run
pub fn benchmark_panel() -> Vec<PlayerSpec> {
    fn bench(id: &str, label: &str, kind: StrategyKind, params: StrategyParams) -> PlayerSpec {
        PlayerSpec {
            id: id.to_string(),
            generation: None,
            label: label.to_string(),
            kind,
            params,
        }
    }

    let default = StrategyParams::default();
    vec![
        bench("bench_always_cooperate", "never defects", StrategyKind::AlwaysCooperate, default),
        bench("bench_always_defect", "never cooperates", StrategyKind::AlwaysDefect, default),
        bench("bench_tit_for_tat", "copies your last move", StrategyKind::TitForTat, default),
        bench("bench_random", "fair coin each round", StrategyKind::Random, default),
        bench("bench_grudge", "cooperates until betrayed once", StrategyKind::GrimTrigger, default),
        bench("bench_cycler", "plays C, C, D on repeat", StrategyKind::Cyclical, default),
        bench("bench_pavlov", "win-stay, lose-switch", StrategyKind::Pavlov, default),
        bench(
            "bench_suspicious_tft",
            "tit-for-tat that opens with defect",
            StrategyKind::SuspiciousTitForTat,
            default,
        ),
        bench(
            "bench_tit_for_two_tats",
            "retaliates after two straight defections",
            StrategyKind::TitForTwoTats,
            default,
        ),
        bench("bench_gradual", "escalating punishment, then forgives", StrategyKind::Gradual, default),
        bench(
            "bench_forgiving_tft",
            "tit-for-tat with a 20% pardon",
            StrategyKind::TitForTat,
            StrategyParams {
                forgiveness: 20,
                ..Default::default()
            },
        ),
    ]
}
