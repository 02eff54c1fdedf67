//! Tournament runner CLI
//!
//! Loads a candidate registry, plays the full round-robin against the
//! benchmark panel, and appends per-generation rank lists to the results
//! artifact. Exits nonzero without writing anything if any stage fails.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use dilemma_engine::{benchmark_panel, rank_by_generation, run_tournament, Roster, RunConfig};

mod registry;
mod report;

#[derive(Debug, Parser)]
#[command(
    name = "dilemma",
    about = "Simulate noisy iterated-dilemma tournaments and rank candidate strategies"
)]
struct Args {
    /// Candidate registry file (JSON, grouped by generation)
    #[arg(long)]
    registry: PathBuf,

    /// Payoff matrix to play ("classic" or "generous")
    #[arg(long, default_value = "classic")]
    game: String,

    /// Rounds per match
    #[arg(long, default_value_t = 200)]
    rounds: u32,

    /// Probability that a played action is recorded flipped
    #[arg(long, default_value_t = 0.05)]
    noise: f64,

    /// Matches per pairing
    #[arg(long, default_value_t = 10)]
    repetitions: u32,

    /// Run-level seed; the whole run reproduces from it
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Results artifact to append rank lists to
    #[arg(long, default_value = "ranks.txt")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let candidates = registry::load_registry(&args.registry)?;
    info!(candidates = candidates.len(), "registry loaded");

    let mut players = benchmark_panel();
    players.extend(candidates);
    let roster = Roster::new(players)?;

    let config = RunConfig {
        game: args.game,
        rounds: args.rounds,
        noise: args.noise,
        repetitions: args.repetitions,
        seed: args.seed,
    };

    let result = run_tournament(&roster, &config)?;
    let ranks = rank_by_generation(&roster, &result);

    report::append_ranks(&args.output, &ranks)
        .with_context(|| format!("writing results artifact {}", args.output.display()))?;

    for list in &ranks {
        let best = list
            .entries
            .first()
            .map(|entry| entry.id.as_str())
            .unwrap_or("-");
        info!(generation = list.generation, best, "generation ranked");
    }
    info!(output = %args.output.display(), "rank lists written");

    Ok(())
}
