//! English stop words excluded from keyword and phrase candidacy.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Function words, pronouns, filler verbs and time/quantity words
const STOPWORDS_EN: &[&str] = &[
    // Basic
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "day", "get", "has", "him", "his", "how", "man", "new", "now", "old", "see",
    "two", "way", "who", "boy", "did", "its", "let", "put", "say", "she", "too", "use", "that",
    "with", "have", "this", "will", "your", "from", "they", "know", "want", "been", "good",
    "much", "some", "time", "very", "when", "come", "here", "just", "like", "long", "make",
    "many", "over", "such", "take", "than", "them", "well", "were", "what",
    // Common connectives
    "also", "after", "back", "other", "more", "most", "first", "last", "each", "which", "there",
    "would", "could", "should", "about", "into", "only", "think", "where", "being", "both",
    "during", "before", "above", "below", "between", "through", "same", "different", "another",
    "without", "within", "still", "again", "against", "while", "since",
    // Articles and prepositions
    "a", "an", "as", "at", "be", "by", "do", "he", "if", "in", "is", "it", "my", "no", "of", "on",
    "or", "so", "to", "up", "we", "me", "am",
    // Verbs that are rarely keywords
    "said", "says", "going", "goes", "went", "came", "made", "makes", "look", "looks", "looked",
    "give", "gives", "gave", "told", "tell", "asked", "ask", "find", "found", "left", "right",
    "start", "started", "stop", "stopped", "turn", "turned", "work", "worked", "play", "played",
    "quot",
    // Time and quantity
    "year", "years", "month", "months", "week", "weeks", "today", "tomorrow", "yesterday",
    "always", "never", "often", "sometimes", "usually", "once", "twice", "three", "four", "five",
    "six", "seven", "eight", "nine", "ten",
];

static STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS_EN.iter().copied().collect());

/// Check if a lowercase word is a stop word
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_words_present() {
        for word in ["the", "and", "for", "are", "but", "not", "you", "all"] {
            assert!(is_stopword(word), "'{}' should be a stop word", word);
        }
    }

    #[test]
    fn test_extended_words_present() {
        for word in ["also", "after", "back", "other", "more", "said", "year", "today"] {
            assert!(is_stopword(word), "'{}' should be a stop word", word);
        }
    }

    #[test]
    fn test_content_words_absent() {
        for word in ["technology", "market", "intelligence", "rust"] {
            assert!(!is_stopword(word));
        }
    }

    #[test]
    fn test_list_size() {
        assert!(STOPWORDS.len() >= 150);
    }
}
