//! Spam heuristic: token dominance, special-character density, spam phrases.

use std::collections::HashMap;

use super::limits::SPAM_PHRASES;

/// Token count above which the dominance rule applies
const DOMINANCE_MIN_TOKENS: usize = 20;
const DOMINANCE_RATIO: f64 = 0.20;
const SPECIAL_CHAR_RATIO: f64 = 0.15;
const SPAM_PHRASE_THRESHOLD: usize = 2;

fn is_special_char(c: char) -> bool {
    matches!(
        c,
        '!' | '@' | '#' | '$' | '%' | '^' | '&' | '*' | '(' | ')' | '_' | '+' | '='
            | '[' | ']' | '{' | '}' | ';' | ':' | '"' | '|' | '<' | '>' | '?'
    )
}

/// Returns `true` if any of the three spam rules fires.
pub fn is_spammy(text: &str) -> bool {
    has_dominant_token(text)
        || has_excess_special_chars(text)
        || spam_phrase_count(text) >= SPAM_PHRASE_THRESHOLD
}

/// More than 20 tokens and a single lowercase token above 20% of them.
fn has_dominant_token(text: &str) -> bool {
    let lower = text.to_lowercase();
    let tokens: Vec<&str> = lower.split_whitespace().collect();
    if tokens.len() <= DOMINANCE_MIN_TOKENS {
        return false;
    }

    let mut freq: HashMap<&str, usize> = HashMap::new();
    for token in &tokens {
        *freq.entry(token).or_insert(0) += 1;
    }

    let max_freq = freq.values().copied().max().unwrap_or(0);
    max_freq as f64 > tokens.len() as f64 * DOMINANCE_RATIO
}

fn has_excess_special_chars(text: &str) -> bool {
    let total = text.chars().count();
    let special = text.chars().filter(|&c| is_special_char(c)).count();
    special as f64 > total as f64 * SPECIAL_CHAR_RATIO
}

/// Number of distinct spam phrases present, case-insensitively.
pub fn spam_phrase_count(text: &str) -> usize {
    let lower = text.to_lowercase();
    SPAM_PHRASES
        .iter()
        .filter(|phrase| lower.contains(*phrase))
        .count()
}
