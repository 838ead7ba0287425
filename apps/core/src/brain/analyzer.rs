//! Text Analyzer - Main orchestrator for the Brain module.
//!
//! Runs summary, keyword and phrase extraction over one body of text and
//! bundles the results. Every step is a pure function of the input.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::keywords::{extract_keywords, DEFAULT_MAX_KEYWORDS};
use super::phrases::{extract_key_phrases, DEFAULT_MAX_PHRASES};
use super::summary::{summarize, DEFAULT_SUMMARY_SENTENCES};
use crate::models::AnalysisResult;

/// Output limits for the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerSettings {
    pub summary_sentences: usize,
    pub max_keywords: usize,
    pub max_phrases: usize,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            summary_sentences: DEFAULT_SUMMARY_SENTENCES,
            max_keywords: DEFAULT_MAX_KEYWORDS,
            max_phrases: DEFAULT_MAX_PHRASES,
        }
    }
}

/// Main analyzer that orchestrates all extraction components
#[derive(Debug, Clone, Default)]
pub struct TextAnalyzer {
    settings: AnalyzerSettings,
}

impl TextAnalyzer {
    /// Create an analyzer with default limits
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: AnalyzerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    /// Analyze a body and produce summary, keywords and phrases
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let start = Instant::now();

        let result = AnalysisResult {
            summary: summarize(text, self.settings.summary_sentences),
            keywords: extract_keywords(text, self.settings.max_keywords),
            phrases: extract_key_phrases(text, self.settings.max_phrases),
        };

        debug!(
            chars = text.len(),
            keywords = result.keywords.len(),
            phrases = result.phrases.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Text analysis complete"
        );

        result
    }
}
