//! Keyword Extraction using sentence-level TF-IDF.
//!
//! There is no external corpus: each sentence of the text is treated as a
//! document, so a term concentrated in a few sentences scores above one spread
//! evenly across all of them. Scores are boosted for longer words and for
//! words that occur early in the text.
//!
//! Ranking is fully deterministic: ties on score are broken by the position
//! of the word's first occurrence.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use super::tokenizer::{split_sentences, tokenize};

/// Default number of keywords returned
pub const DEFAULT_MAX_KEYWORDS: usize = 15;

/// Texts shorter than this (trimmed, in characters) yield no keywords
const MIN_TEXT_CHARS: usize = 50;
/// Below this many tokens the text is too small to rank
const MIN_TOKENS_FOR_RANKING: usize = 10;
/// Words first seen within this many tokens get the position boost
const EARLY_WINDOW: usize = 100;
const EARLY_BOOST: f64 = 1.2;
/// Words longer than this are eligible even when they occur once
const RARE_WORD_MIN_LENGTH: usize = 6;

/// A ranked keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordScore {
    pub keyword: String,
    /// Boosted TF-IDF score
    pub score: f64,
    /// Raw frequency in the text
    pub frequency: usize,
}

/// Per-term counters, kept in first-seen order
struct TermStats<'a> {
    term: &'a str,
    first_seen: usize,
    count: usize,
    doc_freq: usize,
}

fn collect_terms(tokens: &[String]) -> (Vec<TermStats<'_>>, HashMap<&str, usize>) {
    let mut terms: Vec<TermStats<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for (pos, token) in tokens.iter().enumerate() {
        match index.get(token.as_str()) {
            Some(&i) => terms[i].count += 1,
            None => {
                index.insert(token.as_str(), terms.len());
                terms.push(TermStats {
                    term: token.as_str(),
                    first_seen: pos,
                    count: 1,
                    doc_freq: 0,
                });
            }
        }
    }

    (terms, index)
}

/// Length factor: 1.0 up to four letters, then len/6 capped at 2.0.
fn length_boost(word: &str) -> f64 {
    let len = word.len();
    if len > 4 {
        (len as f64 / 6.0).min(2.0)
    } else {
        1.0
    }
}

/// Extract the top `max_keywords` keywords with their scores.
pub fn extract_keywords_scored(text: &str, max_keywords: usize) -> Vec<KeywordScore> {
    if text.trim().chars().count() < MIN_TEXT_CHARS {
        return vec![];
    }

    let tokens = tokenize(text);
    let (mut terms, index) = collect_terms(&tokens);

    if tokens.len() < MIN_TOKENS_FOR_RANKING {
        // Too little text to rank: distinct tokens in first-seen order.
        return terms
            .iter()
            .take(max_keywords)
            .map(|t| KeywordScore {
                keyword: t.term.to_string(),
                score: 0.0,
                frequency: t.count,
            })
            .collect();
    }

    // Document frequency, with sentences as documents
    let sentences = split_sentences(text);
    let num_sentences = sentences.iter().filter(|s| !s.trim().is_empty()).count();
    for sentence in &sentences {
        let distinct: HashSet<String> = tokenize(sentence).into_iter().collect();
        for word in &distinct {
            if let Some(&i) = index.get(word.as_str()) {
                terms[i].doc_freq += 1;
            }
        }
    }

    let total = tokens.len() as f64;
    let mut scored: Vec<(usize, KeywordScore)> = terms
        .iter()
        .filter(|t| t.count >= 2 || t.term.len() > RARE_WORD_MIN_LENGTH)
        .map(|t| {
            let tf = t.count as f64 / total;
            let tfidf = if t.doc_freq > 0 {
                tf * (num_sentences as f64 / t.doc_freq as f64).ln()
            } else {
                tf
            };
            let position_boost = if t.first_seen < EARLY_WINDOW { EARLY_BOOST } else { 1.0 };
            (
                t.first_seen,
                KeywordScore {
                    keyword: t.term.to_string(),
                    score: tfidf * length_boost(t.term) * position_boost,
                    frequency: t.count,
                },
            )
        })
        .collect();

    scored.sort_by(|(a_pos, a), (b_pos, b)| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a_pos.cmp(b_pos))
    });

    scored
        .into_iter()
        .take(max_keywords)
        .map(|(_, k)| k)
        .collect()
}

/// Extract keywords and return just the strings
pub fn extract_keywords(text: &str, max_keywords: usize) -> Vec<String> {
    extract_keywords_scored(text, max_keywords)
        .into_iter()
        .map(|k| k.keyword)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = "Artificial intelligence is transforming the technology industry. \
        Machine learning algorithms are becoming more sophisticated. \
        Companies are investing heavily in artificial intelligence research. \
        The future of technology depends on machine learning advances. \
        Data science and artificial intelligence are closely related fields.";

    #[test]
    fn test_keyword_extraction() {
        let keywords = extract_keywords(ARTICLE, DEFAULT_MAX_KEYWORDS);

        assert!(!keywords.is_empty());
        assert!(keywords.len() <= DEFAULT_MAX_KEYWORDS);
        assert!(
            keywords.contains(&"artificial".to_string())
                || keywords.contains(&"intelligence".to_string())
                || keywords.contains(&"machine".to_string())
        );
    }

    #[test]
    fn test_stopword_filtering() {
        let text = "The quick brown fox jumps over the lazy dog. \
                    The dog was sleeping under the tree. \
                    The fox was very quick and agile.";
        let keywords = extract_keywords(text, DEFAULT_MAX_KEYWORDS);

        for stop in ["the", "was", "and", "very", "over"] {
            assert!(!keywords.contains(&stop.to_string()));
        }
    }

    #[test]
    fn test_short_text_yields_nothing() {
        assert!(extract_keywords("Short text.", DEFAULT_MAX_KEYWORDS).is_empty());
        assert!(extract_keywords("", DEFAULT_MAX_KEYWORDS).is_empty());
        assert!(extract_keywords(&format!("  {}  ", "x".repeat(49)), 5).is_empty());
    }

    #[test]
    fn test_max_limit() {
        let text = ARTICLE.repeat(3);
        assert!(extract_keywords(&text, 5).len() <= 5);
        assert!(extract_keywords(&text, 0).is_empty());
    }

    #[test]
    fn test_few_tokens_first_seen_order() {
        // 50+ chars but fewer than 10 surviving tokens
        let text = "Rust compiler, the rust borrow checker, and the cargo tool are here";
        let keywords = extract_keywords(text, DEFAULT_MAX_KEYWORDS);
        assert_eq!(keywords, vec!["rust", "compiler", "borrow", "checker", "cargo", "tool"]);
    }

    #[test]
    fn test_rare_short_words_are_gated_out() {
        let keywords = extract_keywords(ARTICLE, DEFAULT_MAX_KEYWORDS);
        // "data" occurs once and has only four letters
        assert!(!keywords.contains(&"data".to_string()));
        // "sophisticated" occurs once but is long enough to stay eligible
        assert!(keywords.contains(&"sophisticated".to_string()));
    }

    #[test]
    fn test_deterministic_ranking() {
        let first = extract_keywords_scored(ARTICLE, DEFAULT_MAX_KEYWORDS);
        for _ in 0..10 {
            assert_eq!(extract_keywords_scored(ARTICLE, DEFAULT_MAX_KEYWORDS), first);
        }
    }

    #[test]
    fn test_ties_break_on_first_occurrence() {
        // Every word appears in exactly one sentence, twice, with equal length.
        let text = "alpha alpha. bravo bravo. delta delta. gamma gamma. omega omega. \
                    sigma sigma.";
        let keywords = extract_keywords(text, DEFAULT_MAX_KEYWORDS);
        assert_eq!(keywords, vec!["alpha", "bravo", "delta", "gamma", "omega", "sigma"]);
    }

    #[test]
    fn test_scores_are_descending() {
        let scored = extract_keywords_scored(ARTICLE, DEFAULT_MAX_KEYWORDS);
        for pair in scored.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}
