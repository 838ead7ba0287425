//! # Guard Module
//!
//! Threat filter for untrusted submissions. Runs BEFORE any analysis.
//!
//! ## Components
//! - `patterns`: ordered dangerous-pattern table (data, not code)
//! - `validator`: admission checks for domain, title and body
//! - `spam`: spam heuristic used by the body validator
//! - `sanitizer`: stripped/escaped sanitization and per-field truncation
//! - `html`: tag stripping and entity encoding/decoding
//! - `limits`: field limits and fixed word lists

pub mod html;
pub mod limits;
pub mod patterns;
pub mod sanitizer;
pub mod spam;
pub mod validator;

pub use patterns::{
    contains_dangerous_pattern, scan_threats, PatternRule, ThreatCategory, ThreatMatch,
    DANGEROUS_PATTERNS, FILTERED_MARKER,
};
pub use sanitizer::{sanitize, sanitize_submission, truncate_chars, SanitizeMode};
pub use spam::is_spammy;
pub use validator::{
    comprehensive_validation, validate_article_content, validate_domain, validate_title, Field,
    RejectionReason, ValidationOutcome,
};
