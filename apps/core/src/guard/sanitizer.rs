//! Text sanitization.
//!
//! `sanitize` is total: it accepts any `&str` (empty, whitespace only,
//! control bytes, mixed line endings) and always returns a string.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;
use std::sync::LazyLock;

use super::html;
use super::limits::{MAX_BODY_LENGTH, MAX_DOMAIN_LENGTH, MAX_TITLE_LENGTH};
use super::patterns::{COMPILED_PATTERNS, FILTERED_MARKER};
use crate::models::{RawSubmission, SanitizedSubmission};

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex: whitespace run"));

/// Upper bound on filter passes. One pass almost always suffices; extra passes
/// only run when a replacement exposed a new match.
const MAX_FILTER_PASSES: usize = 4;

/// How HTML in the input is neutralized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SanitizeMode {
    /// Remove tags, then decode entities
    #[default]
    Stripped,
    /// Entity-encode HTML-significant characters, keeping tags as literal text
    Escaped,
}

impl FromStr for SanitizeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stripped" | "strip" => Ok(SanitizeMode::Stripped),
            "escaped" | "escape" => Ok(SanitizeMode::Escaped),
            other => Err(format!("unknown sanitize mode '{}'", other)),
        }
    }
}

/// Neutralize `text` so that no dangerous pattern survives.
pub fn sanitize(text: &str, mode: SanitizeMode) -> String {
    let text = text.replace('\0', "").replace("\r\n", "\n");

    let text = match mode {
        SanitizeMode::Escaped => html::escape(&text),
        SanitizeMode::Stripped => html::unescape(&html::strip_tags(&text)),
    };

    let filtered = filter_dangerous(text);

    WHITESPACE_RUN.replace_all(&filtered, " ").trim().to_string()
}

/// Replace every dangerous match with the filter marker.
fn filter_dangerous(mut text: String) -> String {
    for _ in 0..MAX_FILTER_PASSES {
        let mut changed = false;
        for compiled in COMPILED_PATTERNS.iter() {
            if let Cow::Owned(replaced) = compiled.regex.replace_all(&text, FILTERED_MARKER) {
                text = replaced;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    text
}

/// Sanitize every field in stripped mode and clamp it to its field limit.
/// A cut never leaves trailing whitespace.
pub fn sanitize_submission(raw: &RawSubmission) -> SanitizedSubmission {
    let clamp = |text: &str, max_chars: usize| {
        truncate_chars(&sanitize(text, SanitizeMode::Stripped), max_chars)
            .trim_end()
            .to_string()
    };
    SanitizedSubmission {
        domain: clamp(&raw.domain, MAX_DOMAIN_LENGTH),
        title: clamp(&raw.title, MAX_TITLE_LENGTH),
        body: clamp(&raw.body, MAX_BODY_LENGTH),
    }
}

/// Keep at most `max_chars` characters, cutting on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
