//! # Brain Module
//!
//! Deterministic, corpus-free text analytics for vetted documents.
//! Runs AFTER the guard has sanitized the body.
//!
//! ## Components
//! - `tokenizer`: word and sentence splitting
//! - `stopwords`: fixed English stop-word list
//! - `summary`: leading-sentence summary
//! - `keywords`: sentence-level TF-IDF keyword extraction
//! - `phrases`: keyword-guided 2-4 word phrase extraction
//! - `analyzer`: Main orchestrator

pub mod analyzer;
pub mod keywords;
pub mod phrases;
pub mod stopwords;
pub mod summary;
pub mod tokenizer;

// Re-export main types for convenience
pub use analyzer::{AnalyzerSettings, TextAnalyzer};
pub use keywords::{extract_keywords, extract_keywords_scored, KeywordScore, DEFAULT_MAX_KEYWORDS};
pub use phrases::{extract_key_phrases, extract_key_phrases_scored, PhraseScore, DEFAULT_MAX_PHRASES};
pub use stopwords::is_stopword;
pub use summary::{summarize, DEFAULT_SUMMARY_SENTENCES};
pub use tokenizer::{sentences, tokenize, words};
