//! Text tokenization.
//!
//! Splitting is deliberately plain: words are whitespace runs, sentences are
//! runs between terminal punctuation. Abbreviations, decimals and URLs are not
//! special-cased, so scores stay comparable with other Flesch calculators that
//! use the same rules.
//!
//! Whitespace is Unicode `White_Space` as used by [`char::is_whitespace`].
//! This differs from the ECMAScript `\s` class on two code points: U+0085
//! (NEXT LINE) separates words here, and U+FEFF (BYTE ORDER MARK) does not and
//! counts as a character.

use regex::Regex;
use std::sync::LazyLock;

/// One or more sentence terminators.
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Split text into words (maximal runs of non-whitespace characters).
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Split text into sentences on runs of `.`, `!` and `?`.
///
/// Only empty pieces are discarded. A whitespace-only piece (the tail of
/// `"Hi. "`) still counts as a sentence.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(text)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Count the non-whitespace characters in text.
pub fn count_characters(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_class_is_unicode_white_space() {
        assert_eq!(split_words("one\u{85}two"), vec!["one", "two"]);
        assert_eq!(split_words("\u{feff}one"), vec!["\u{feff}one"]);
        assert_eq!(count_characters("\u{85}a\u{feff}"), 2);
    }

    #[test]
    fn words_ignore_surrounding_whitespace() {
        assert_eq!(split_words("  Cat \t sat.\n"), vec!["Cat", "sat."]);
        assert!(split_words("").is_empty());
        assert!(split_words(" \n\t ").is_empty());
    }

    #[test]
    fn sentences_split_on_terminator_runs() {
        let sentences = split_sentences("Wait... What?! Yes.");
        assert_eq!(sentences, vec!["Wait", " What", " Yes"]);
    }

    #[test]
    fn trailing_whitespace_piece_is_a_sentence() {
        assert_eq!(split_sentences("Hi. "), vec!["Hi", " "]);
    }

    #[test]
    fn text_without_terminator_is_one_sentence() {
        assert_eq!(split_sentences("no punctuation here"), vec!["no punctuation here"]);
    }

    #[test]
    fn only_terminators_yield_no_sentences() {
        assert!(split_sentences("...!?").is_empty());
        assert!(split_sentences("").is_empty());
    }

    #[test]
    fn characters_exclude_whitespace() {
        assert_eq!(count_characters("Cat sat."), 7);
        assert_eq!(count_characters(" a\u{00a0}b\n"), 2);
        assert_eq!(count_characters("ñandú"), 5);
    }
}
