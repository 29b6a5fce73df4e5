//! Level command: map a Flesch Reading Ease score to its named band.

use anyhow::bail;
use clap::Args;
use serde::Serialize;
use tracing::{debug, instrument};

use readably_core::ReadingLevel;

/// Arguments for the `level` subcommand.
#[derive(Args, Debug)]
pub struct LevelArgs {
    /// Flesch Reading Ease score (0-100).
    #[arg(allow_negative_numbers = true)]
    pub score: f64,
}

#[derive(Serialize)]
struct LevelOutput {
    score: f64,
    level: ReadingLevel,
}

/// Print the reading level for a score.
#[instrument(name = "cmd_level", skip_all, fields(score = args.score))]
pub fn cmd_level(args: LevelArgs, global_json: bool) -> anyhow::Result<()> {
    debug!("executing level command");

    if !args.score.is_finite() {
        bail!("score must be a finite number, got {}", args.score);
    }

    let level = ReadingLevel::from_score(args.score);
    if global_json {
        let output = LevelOutput {
            score: args.score,
            level,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{level}");
    }
    Ok(())
}
