//! Ranking aggregation
//!
//! A pure function of already-collected tournament data: re-running it on
//! the same results always yields the same lists, and adding a later
//! generation never requires replaying earlier matches.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tournament::{Roster, TournamentResult};

/// Aggregate standing for one candidate
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEntry {
    pub generation: u32,
    pub id: String,
    /// Total score over all the candidate's matches. The full round-robin
    /// gives every player the same match count, so totals compare fairly.
    pub total: i64,
    pub matches: usize,
}

/// Candidates of one generation, best to worst
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankList {
    pub generation: u32,
    pub entries: Vec<RankEntry>,
}

impl RankList {
    /// Candidate ids in rank order
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }
}

/// Rank every candidate generation by aggregate score, descending.
/// Benchmark panel members (no generation) accumulate opponents' scores
/// but never appear in the output. Ties keep roster order (stable sort).
pub fn rank_by_generation(roster: &Roster, result: &TournamentResult) -> Vec<RankList> {
    let mut totals = vec![0i64; roster.len()];
    let mut counts = vec![0usize; roster.len()];

    // Order-independent accumulation keyed by roster index
    for outcome in &result.outcomes {
        totals[outcome.player_a] += outcome.result.score_a;
        totals[outcome.player_b] += outcome.result.score_b;
        counts[outcome.player_a] += 1;
        counts[outcome.player_b] += 1;
    }

    let mut families: BTreeMap<u32, Vec<RankEntry>> = BTreeMap::new();
    for (index, player) in roster.players().iter().enumerate() {
        if let Some(generation) = player.generation {
            families.entry(generation).or_default().push(RankEntry {
                generation,
                id: player.id.clone(),
                total: totals[index],
                matches: counts[index],
            });
        }
    }

    families
        .into_iter()
        .map(|(generation, mut entries)| {
            entries.sort_by(|x, y| y.total.cmp(&x.total));
            RankList {
                generation,
                entries,
            }
        })
        .collect()
}
