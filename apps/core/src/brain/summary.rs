//! Extractive summary: the leading sentences of the text.

use super::tokenizer::sentences;

/// Default number of sentences kept in a summary
pub const DEFAULT_SUMMARY_SENTENCES: usize = 3;

/// Join the first `max_sentences` sentences with `". "`, appending `"..."`
/// when sentences were dropped. Blank input yields an empty summary.
pub fn summarize(text: &str, max_sentences: usize) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let sentences = sentences(text);
    if sentences.len() <= max_sentences {
        return sentences.join(". ");
    }

    let mut summary = sentences[..max_sentences].join(". ");
    summary.push_str("...");
    summary
}
