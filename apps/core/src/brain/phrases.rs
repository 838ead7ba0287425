//! Key-phrase extraction.
//!
//! Candidates are 2 to 4 word spans inside a sentence that contain at least
//! one top keyword and are neither opened nor closed by a stop word.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use super::keywords::extract_keywords;
use super::stopwords::is_stopword;
use super::tokenizer::{split_sentences, words};

/// Default number of phrases returned
pub const DEFAULT_MAX_PHRASES: usize = 8;

/// Texts shorter than this (trimmed, in characters) yield no phrases
const MIN_TEXT_CHARS: usize = 100;
/// Sentences shorter than this (trimmed) are skipped
const MIN_SENTENCE_CHARS: usize = 20;
/// Size of the keyword pool guiding candidate selection
const KEYWORD_POOL_SIZE: usize = 20;
const SPAN_LENGTHS: [usize; 3] = [2, 3, 4];
const LENGTH_BONUS_STEP: f64 = 0.1;
const MIN_DENSITY: f64 = 0.5;

/// A ranked phrase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhraseScore {
    pub phrase: String,
    pub score: f64,
    /// Number of accepted occurrences
    pub frequency: usize,
    /// Share of the phrase's words that are keywords
    pub keyword_density: f64,
}

fn accepts(span: &[String], keywords: &HashSet<String>) -> bool {
    let (Some(first), Some(last)) = (span.first(), span.last()) else {
        return false;
    };
    if is_stopword(first) || is_stopword(last) {
        return false;
    }

    let has_keyword = span.iter().any(|w| keywords.contains(w));
    let content_words = span.iter().filter(|w| !is_stopword(w)).count();
    has_keyword && content_words >= span.len().div_ceil(2)
}

/// Extract the top `max_phrases` phrases with their scores.
pub fn extract_key_phrases_scored(text: &str, max_phrases: usize) -> Vec<PhraseScore> {
    if text.trim().chars().count() < MIN_TEXT_CHARS {
        return vec![];
    }

    let keywords: HashSet<String> = extract_keywords(text, KEYWORD_POOL_SIZE)
        .into_iter()
        .collect();

    // Candidate pool in first-seen order, with acceptance counts
    let mut candidates: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for sentence in split_sentences(text) {
        let sentence = sentence.trim();
        if sentence.chars().count() < MIN_SENTENCE_CHARS {
            continue;
        }

        let sentence_words = words(sentence);
        for start in 0..sentence_words.len() {
            for len in SPAN_LENGTHS {
                let Some(span) = sentence_words.get(start..start + len) else {
                    continue;
                };
                if !accepts(span, &keywords) {
                    continue;
                }

                let phrase = span.join(" ");
                match index.get(&phrase) {
                    Some(&i) => candidates[i].1 += 1,
                    None => {
                        index.insert(phrase.clone(), candidates.len());
                        candidates.push((phrase, 1));
                    }
                }
            }
        }
    }

    let mut scored: Vec<(usize, PhraseScore)> = candidates
        .into_iter()
        .enumerate()
        .filter_map(|(order, (phrase, frequency))| {
            let tokens: Vec<&str> = phrase.split(' ').collect();
            let keyword_count = tokens.iter().filter(|t| keywords.contains(**t)).count();
            let keyword_density = keyword_count as f64 / tokens.len() as f64;

            if frequency < 2 && keyword_density < MIN_DENSITY {
                return None;
            }

            let base = frequency as f64 * keyword_density;
            let length_bonus = 1.0 + LENGTH_BONUS_STEP * (tokens.len() as f64 - 2.0);
            Some((
                order,
                PhraseScore {
                    phrase,
                    score: base * length_bonus,
                    frequency,
                    keyword_density,
                },
            ))
        })
        .collect();

    scored.sort_by(|(a_order, a), (b_order, b)| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a_order.cmp(b_order))
    });

    scored
        .into_iter()
        .take(max_phrases)
        .map(|(_, p)| p)
        .collect()
}

/// Extract key phrases and return just the strings
pub fn extract_key_phrases(text: &str, max_phrases: usize) -> Vec<String> {
    extract_key_phrases_scored(text, max_phrases)
        .into_iter()
        .map(|p| p.phrase)
        .collect()
}
