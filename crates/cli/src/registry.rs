//! Candidate registry loading
//!
//! A registry file declares generations of candidate strategies as plain
//! data, for example:
//!
//! ```json
//! {
//!   "generations": [
//!     {
//!       "n": 1,
//!       "candidates": [
//!         {
//!           "id": "gen1_forgiver",
//!           "label": "patient",
//!           "strategy": "tit_for_tat",
//!           "params": { "forgiveness": 25 }
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use dilemma_engine::{PlayerSpec, StrategyKind, StrategyParams};

#[derive(Debug, Deserialize)]
pub struct RegistryFile {
    pub generations: Vec<GenerationDecl>,
}

#[derive(Debug, Deserialize)]
pub struct GenerationDecl {
    pub n: u32,
    pub candidates: Vec<CandidateDecl>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateDecl {
    pub id: String,
    /// Free-text attitude label; metadata only
    #[serde(default)]
    pub label: String,
    pub strategy: StrategyKind,
    #[serde(default)]
    pub params: StrategyParams,
}

/// Load a registry file into roster entries, grouped by generation
pub fn load_registry(path: &Path) -> Result<Vec<PlayerSpec>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading registry {}", path.display()))?;
    let file = parse_registry(&text)
        .with_context(|| format!("parsing registry {}", path.display()))?;

    let mut players = Vec::new();
    for generation in &file.generations {
        for candidate in &generation.candidates {
            players.push(PlayerSpec {
                id: candidate.id.clone(),
                generation: Some(generation.n),
                label: candidate.label.clone(),
                kind: candidate.strategy,
                params: candidate.params,
            });
        }
    }
    Ok(players)
}

fn parse_registry(text: &str) -> Result<RegistryFile> {
    let file: RegistryFile = serde_json::from_str(text)?;
    if file.generations.is_empty() {
        bail!("registry declares no generations");
    }
    Ok(file)
}
