//! Tokenization and sentence splitting shared by the analytics.

use regex::Regex;
use std::sync::LazyLock;

use super::stopwords::is_stopword;

static ASCII_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+").expect("Invalid regex: ASCII word"));

static SENTENCE_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("Invalid regex: sentence delimiter"));

const MIN_TOKEN_LENGTH: usize = 3;
const MAX_TOKEN_LENGTH: usize = 20;

/// Maximal runs of ASCII letters, lowercased. No filtering.
pub fn words(text: &str) -> Vec<String> {
    ASCII_WORD
        .find_iter(text)
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect()
}

/// Words kept for keyword scoring: 3..=20 letters, not numeric, not a stop word.
pub fn tokenize(text: &str) -> Vec<String> {
    words(text)
        .into_iter()
        .filter(|word| {
            (MIN_TOKEN_LENGTH..=MAX_TOKEN_LENGTH).contains(&word.len())
                && !word.chars().all(|c| c.is_ascii_digit())
                && !is_stopword(word)
        })
        .collect()
}

/// Raw segments between runs of `.`, `!`, `?`. Segments are neither trimmed
/// nor filtered; callers decide what counts as a sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_DELIMITER.split(text).collect()
}

/// Trimmed, non-empty sentences.
pub fn sentences(text: &str) -> Vec<&str> {
    split_sentences(text)
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
