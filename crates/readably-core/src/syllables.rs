//! Heuristic syllable counting.
//!
//! This is the classic vowel-group estimate used by most web Flesch
//! calculators. It misjudges plenty of words ("horses" counts as one
//! syllable), but readability scores are only comparable across tools when
//! the counting rule matches, so the rule is kept as-is.

use regex::Regex;
use std::sync::LazyLock;

/// Silent endings: consonant + "es", "ed", or consonant + "e".
///
/// `l` is grouped with the vowels, so "-le" words ("table", "simple") keep
/// their final syllable.
static SILENT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:[^laeiouy]es|ed|[^laeiouy]e)$").expect("valid regex"));

/// A leading "y" acts as a consonant.
static LEADING_Y: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^y").expect("valid regex"));

/// Runs of one or two vowels, each counted as a syllable.
static VOWEL_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[aeiouy]{1,2}").expect("valid regex"));

/// Words at or below this length always count as one syllable.
const SHORT_WORD_LEN: usize = 3;

/// Estimate the number of syllables in a single word.
///
/// Case-insensitive. Punctuation attached to the word is not stripped, and
/// every word counts as at least one syllable.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    if word.chars().count() <= SHORT_WORD_LEN {
        return 1;
    }

    let word = SILENT_SUFFIX.replace(&word, "");
    let word = LEADING_Y.replace(&word, "");

    match VOWEL_GROUP.find_iter(&word).count() {
        0 => 1,
        n => n,
    }
}
