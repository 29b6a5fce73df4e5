//! Readability scoring using Flesch Reading Ease and Flesch-Kincaid Grade Level.
//!
//! Formulas:
//! - Reading Ease: `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`,
//!   clamped to `[0, 100]`. Higher = easier.
//! - Grade Level: `0.39 * (words/sentences) + 11.8 * (syllables/words) - 15.59`,
//!   floored at `0`. Lower = easier.
//!
//! Tokenization comes from [`text`] and syllable estimates from
//! [`syllables`]. Scoring never fails: text with no words, or words but no
//! sentence, produces a report with zeroed averages and scores and
//! `scored = false`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::syllables::count_syllables;
use crate::text;

/// Average silent reading speed used for the time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

/// Qualitative band for a Flesch Reading Ease score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize, JsonSchema)]
pub enum ReadingLevel {
    /// 90 and above.
    #[serde(rename = "Very Easy")]
    VeryEasy,
    /// 80 up to 90.
    #[serde(rename = "Easy")]
    Easy,
    /// 70 up to 80.
    #[serde(rename = "Fairly Easy")]
    FairlyEasy,
    /// 60 up to 70.
    #[serde(rename = "Standard")]
    Standard,
    /// 50 up to 60.
    #[serde(rename = "Fairly Difficult")]
    FairlyDifficult,
    /// 30 up to 50.
    #[serde(rename = "Difficult")]
    Difficult,
    /// Below 30.
    #[default]
    #[serde(rename = "Very Difficult")]
    VeryDifficult,
}

impl ReadingLevel {
    /// All bands, easiest first.
    pub const ALL: [Self; 7] = [
        Self::VeryEasy,
        Self::Easy,
        Self::FairlyEasy,
        Self::Standard,
        Self::FairlyDifficult,
        Self::Difficult,
        Self::VeryDifficult,
    ];

    /// Band a Flesch Reading Ease score.
    ///
    /// Each band includes its lower bound: exactly 90 is "Very Easy",
    /// exactly 85 is "Easy".
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::VeryEasy
        } else if score >= 80.0 {
            Self::Easy
        } else if score >= 70.0 {
            Self::FairlyEasy
        } else if score >= 60.0 {
            Self::Standard
        } else if score >= 50.0 {
            Self::FairlyDifficult
        } else if score >= 30.0 {
            Self::Difficult
        } else {
            Self::VeryDifficult
        }
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::VeryEasy => "Very Easy",
            Self::Easy => "Easy",
            Self::FairlyEasy => "Fairly Easy",
            Self::Standard => "Standard",
            Self::FairlyDifficult => "Fairly Difficult",
            Self::Difficult => "Difficult",
            Self::VeryDifficult => "Very Difficult",
        }
    }
}

impl std::fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of readability analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityReport {
    /// Number of whitespace-delimited words.
    pub word_count: usize,
    /// Number of sentences between `.`, `!` and `?` runs.
    pub sentence_count: usize,
    /// Number of non-whitespace characters.
    pub character_count: usize,
    /// Sum of per-word syllable estimates.
    pub syllable_count: usize,
    /// Words divided by sentences.
    pub avg_words_per_sentence: f64,
    /// Syllables divided by words.
    pub avg_syllables_per_word: f64,
    /// Flesch Reading Ease, clamped to 0--100.
    pub flesch_reading_ease: f64,
    /// Flesch-Kincaid Grade Level, floored at 0.
    pub flesch_kincaid_grade: f64,
    /// Minutes to read at [`WORDS_PER_MINUTE`], rounded up.
    pub estimated_reading_time_minutes: usize,
    /// Band of `flesch_reading_ease`.
    pub level: ReadingLevel,
    /// Whether the averages and scores were computed. `false` when the text
    /// has no words or no sentences.
    pub scored: bool,
}

/// Analyze text and compute counts, averages and Flesch scores.
///
/// Pure and deterministic. Empty or whitespace-only text yields
/// [`ReadabilityReport::default()`].
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn analyze(text: &str) -> ReadabilityReport {
    let words = text::split_words(text);
    if words.is_empty() {
        tracing::debug!("no words in input");
        return ReadabilityReport::default();
    }

    let word_count = words.len();
    let sentence_count = text::split_sentences(text).len();
    let character_count = text::count_characters(text);
    let syllable_count: usize = words.iter().map(|w| count_syllables(w)).sum();
    let estimated_reading_time_minutes = word_count.div_ceil(WORDS_PER_MINUTE);

    let mut report = ReadabilityReport {
        word_count,
        sentence_count,
        character_count,
        syllable_count,
        estimated_reading_time_minutes,
        ..ReadabilityReport::default()
    };

    if sentence_count == 0 {
        tracing::debug!(word_count, "no sentences in input");
        return report;
    }

    let words_per_sentence = word_count as f64 / sentence_count as f64;
    let syllables_per_word = syllable_count as f64 / word_count as f64;

    let ease = (-84.6f64).mul_add(
        syllables_per_word,
        (-1.015f64).mul_add(words_per_sentence, 206.835),
    );
    let grade = 0.39f64.mul_add(words_per_sentence, 11.8 * syllables_per_word) - 15.59;

    report.avg_words_per_sentence = words_per_sentence;
    report.avg_syllables_per_word = syllables_per_word;
    report.flesch_reading_ease = ease.clamp(0.0, 100.0);
    report.flesch_kincaid_grade = grade.max(0.0);
    report.level = ReadingLevel::from_score(report.flesch_reading_ease);
    report.scored = true;
    report
}

/// Thresholds a report must meet to pass a quality gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityGate {
    /// Maximum acceptable Flesch-Kincaid grade.
    pub max_grade: Option<f64>,
    /// Minimum acceptable Flesch Reading Ease.
    pub min_reading_ease: Option<f64>,
}

impl ReadabilityGate {
    /// Whether no threshold is set.
    pub const fn is_empty(&self) -> bool {
        self.max_grade.is_none() && self.min_reading_ease.is_none()
    }
}

/// A readability report checked against a [`ReadabilityGate`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GateReport {
    /// The underlying analysis.
    #[serde(flatten)]
    pub report: ReadabilityReport,
    /// Maximum acceptable grade (if provided).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_grade: Option<f64>,
    /// Minimum acceptable reading ease (if provided).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_reading_ease: Option<f64>,
    /// Whether the grade exceeds the maximum.
    pub over_max_grade: bool,
    /// Whether the reading ease falls below the minimum.
    pub under_min_ease: bool,
}

impl GateReport {
    /// Whether every configured threshold was met.
    pub const fn passed(&self) -> bool {
        !self.over_max_grade && !self.under_min_ease
    }
}

/// Analyze text and evaluate it against a gate.
///
/// Unscored reports (no words or no sentences) never trip a threshold.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn check_readability(text: &str, gate: &ReadabilityGate) -> GateReport {
    let report = analyze(text);

    let over_max_grade = report.scored
        && gate
            .max_grade
            .is_some_and(|max| report.flesch_kincaid_grade > max);
    let under_min_ease = report.scored
        && gate
            .min_reading_ease
            .is_some_and(|min| report.flesch_reading_ease < min);

    GateReport {
        report,
        max_grade: gate.max_grade,
        min_reading_ease: gate.min_reading_ease,
        over_max_grade,
        under_min_ease,
    }
}
