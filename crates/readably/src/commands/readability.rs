//! Readability command: Flesch Reading Ease and Flesch-Kincaid Grade Level scoring.

use anyhow::bail;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use readably_core::document;
use readably_core::readability::{self, GateReport, ReadabilityGate};

/// Arguments for the `readability` subcommand.
#[derive(Args, Debug)]
pub struct ReadabilityArgs {
    /// File to analyze (markdown is reduced to prose first).
    pub file: Utf8PathBuf,

    /// Maximum acceptable grade level.
    #[arg(long)]
    pub max_grade: Option<f64>,

    /// Minimum acceptable reading ease.
    #[arg(long)]
    pub min_ease: Option<f64>,
}

/// Score readability of a file.
///
/// Flags take precedence over the configured gate. A failed gate is an error
/// in text mode; `--json` always prints the report.
#[instrument(name = "cmd_readability", skip_all, fields(file = %args.file))]
pub fn cmd_readability(
    args: ReadabilityArgs,
    global_json: bool,
    config_gate: ReadabilityGate,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(
        max_grade = ?args.max_grade,
        min_ease = ?args.min_ease,
        "executing readability command"
    );

    let content = document::read_text(&args.file, max_input_bytes)?;
    let gate = ReadabilityGate {
        max_grade: args.max_grade.or(config_gate.max_grade),
        min_reading_ease: args.min_ease.or(config_gate.min_reading_ease),
    };

    let report = readability::check_readability(&content, &gate);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.over_max_grade {
        bail!(
            "{} scores grade {:.1} (max: {:.0}). Simplify sentences or reduce jargon.",
            args.file,
            report.report.flesch_kincaid_grade,
            report.max_grade.unwrap_or_default(),
        );
    }
    if report.under_min_ease {
        bail!(
            "{} scores reading ease {:.1} (min: {:.0}). Use shorter words and sentences.",
            args.file,
            report.report.flesch_reading_ease,
            report.min_reading_ease.unwrap_or_default(),
        );
    }

    print_report(&args.file, &report, gate.is_empty());
    Ok(())
}

fn print_report(file: &Utf8Path, gate_report: &GateReport, ungated: bool) {
    let report = &gate_report.report;

    if ungated {
        println!("{}", file.bold());
    } else {
        println!("{} {}", "PASS:".green(), file.bold());
    }

    if report.scored {
        println!(
            "  Reading ease: {:.1} ({})",
            report.flesch_reading_ease,
            report.level.label().cyan()
        );
        println!("  Grade level:  {:.1}", report.flesch_kincaid_grade);
    } else {
        println!("  {}", "Not enough text to score".yellow());
    }
    println!(
        "  Words: {}  Sentences: {}  Characters: {}  Syllables: {}",
        report.word_count, report.sentence_count, report.character_count, report.syllable_count,
    );
    if report.scored {
        println!(
            "  Avg words/sentence: {:.1}  Avg syllables/word: {:.2}",
            report.avg_words_per_sentence, report.avg_syllables_per_word,
        );
    }
    println!(
        "  Reading time: {} min",
        report.estimated_reading_time_minutes
    );
}
