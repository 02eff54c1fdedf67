//! Results artifact writer
//!
//! Appends one rank declaration per generation to the results file:
//! `gen<N>_ranks = ["best", "next", ...]`. Called only after the whole
//! run succeeded, so a failed run leaves no partial artifact.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use dilemma_engine::RankList;

/// Render the rank declarations for all generations
pub fn render_ranks(ranks: &[RankList]) -> String {
    let mut out = String::new();
    for list in ranks {
        let ids: Vec<String> = list
            .entries
            .iter()
            .map(|entry| format!("\"{}\"", entry.id))
            .collect();
        out.push_str(&format!(
            "gen{}_ranks = [{}]\n",
            list.generation,
            ids.join(", ")
        ));
    }
    out
}

/// Append the rendered artifact to `path`, creating the file if needed
pub fn append_ranks(path: &Path, ranks: &[RankList]) -> Result<()> {
    let rendered = render_ranks(ranks);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    file.write_all(rendered.as_bytes())
        .with_context(|| format!("appending to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dilemma_engine::RankEntry;

    fn entry(generation: u32, id: &str, total: i64) -> RankEntry {
        RankEntry {
            generation,
            id: id.to_string(),
            total,
            matches: 4,
        }
    }

    #[test]
    fn test_render_single_generation() {
        let ranks = vec![RankList {
            generation: 3,
            entries: vec![entry(3, "gen3_best", 120), entry(3, "gen3_worst", 40)],
        }];

        assert_eq!(
            render_ranks(&ranks),
            "gen3_ranks = [\"gen3_best\", \"gen3_worst\"]\n"
        );
    }

    #[test]
    fn test_render_multiple_generations() {
        let ranks = vec![
            RankList {
                generation: 1,
                entries: vec![entry(1, "a", 10)],
            },
            RankList {
                generation: 2,
                entries: vec![entry(2, "b", 20), entry(2, "c", 5)],
            },
        ];

        let rendered = render_ranks(&ranks);
        assert_eq!(
            rendered,
            "gen1_ranks = [\"a\"]\ngen2_ranks = [\"b\", \"c\"]\n"
        );
    }

    #[test]
    fn test_render_empty_generation() {
        let ranks = vec![RankList {
            generation: 7,
            entries: vec![],
        }];
        assert_eq!(render_ranks(&ranks), "gen7_ranks = []\n");
    }

    #[test]
    fn test_append_accumulates_runs() {
        let path = std::env::temp_dir().join(format!(
            "dilemma_ranks_test_{}.txt",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let first = vec![RankList {
            generation: 1,
            entries: vec![entry(1, "a", 10)],
        }];
        let second = vec![RankList {
            generation: 2,
            entries: vec![entry(2, "b", 20)],
        }];

        append_ranks(&path, &first).unwrap();
        append_ranks(&path, &second).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "gen1_ranks = [\"a\"]\ngen2_ranks = [\"b\"]\n");

        let _ = std::fs::remove_file(&path);
    }
}
