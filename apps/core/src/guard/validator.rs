//! Admission checks for raw submissions.
//!
//! Validators never modify their input and never panic. Each field check
//! reports its first failing rule; [`comprehensive_validation`] runs all of
//! them and collects every failure.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

use super::limits::{
    MAX_BODY_LENGTH, MAX_DOMAIN_LENGTH, MAX_TITLE_LENGTH, MAX_WORD_LENGTH, MIN_BODY_LENGTH,
    MIN_DOMAIN_LENGTH, MIN_TITLE_LENGTH, SUSPICIOUS_CHAR_RATIO, SUSPICIOUS_DOMAINS,
};
use super::patterns::contains_dangerous_pattern;
use super::spam::is_spammy;
use crate::models::RawSubmission;

static DOMAIN_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("Invalid regex: domain format")
});

/// Submission field a reason refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Domain,
    Title,
    Body,
}

impl Field {
    /// Key used in submissions and in the missing-fields message
    pub fn key(&self) -> &'static str {
        match self {
            Field::Domain => "domain",
            Field::Title => "title",
            Field::Body => "body",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Domain => "Domain",
            Field::Title => "Title",
            Field::Body => "Article",
        };
        f.write_str(label)
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields.iter().map(Field::key).collect::<Vec<_>>().join(", ")
}

/// Why a submission was refused. `Display` renders the human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectionReason {
    /// One or more required fields are absent or blank
    #[error("Missing required fields: {}", join_fields(.0))]
    MissingField(Vec<Field>),

    /// Length bounds or domain grammar
    #[error("{field} validation failed: {detail}")]
    FormatViolation { field: Field, detail: String },

    /// Dangerous pattern, deny-listed domain, or payload-shaped content
    #[error("{field} validation failed: {detail}")]
    SecurityPatternMatch { field: Field, detail: String },

    /// The spam heuristic fired on the body
    #[error("Article validation failed: Content appears to be spam or auto-generated")]
    SpamSuspected,

    /// Input was not a record of fields
    #[error("Invalid data format")]
    InvalidDataShape,
}

impl RejectionReason {
    fn format(field: Field, detail: impl Into<String>) -> Self {
        RejectionReason::FormatViolation {
            field,
            detail: detail.into(),
        }
    }

    fn security(field: Field, detail: impl Into<String>) -> Self {
        RejectionReason::SecurityPatternMatch {
            field,
            detail: detail.into(),
        }
    }
}

/// Admission decision with every collected reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub accepted: bool,
    pub reasons: Vec<RejectionReason>,
}

impl ValidationOutcome {
    fn from_reasons(reasons: Vec<RejectionReason>) -> Self {
        Self {
            accepted: reasons.is_empty(),
            reasons,
        }
    }

    /// Reasons rendered as strings, in check order
    pub fn messages(&self) -> Vec<String> {
        self.reasons.iter().map(ToString::to_string).collect()
    }
}

/// Validate a domain name for format and security issues.
pub fn validate_domain(domain: &str) -> Result<(), RejectionReason> {
    let domain = domain.trim().to_lowercase();
    if domain.is_empty() {
        return Err(RejectionReason::format(Field::Domain, "Domain is required"));
    }

    let len = domain.chars().count();
    if len > MAX_DOMAIN_LENGTH {
        return Err(RejectionReason::format(
            Field::Domain,
            format!("Domain too long (max {} characters)", MAX_DOMAIN_LENGTH),
        ));
    }
    if len < MIN_DOMAIN_LENGTH {
        return Err(RejectionReason::format(Field::Domain, "Domain too short"));
    }

    if !DOMAIN_FORMAT.is_match(&domain) {
        return Err(RejectionReason::format(Field::Domain, "Invalid domain format"));
    }

    if SUSPICIOUS_DOMAINS.contains(&domain.as_str()) {
        return Err(RejectionReason::security(
            Field::Domain,
            "Domain appears to be suspicious",
        ));
    }

    if contains_dangerous_pattern(&domain) {
        return Err(RejectionReason::security(
            Field::Domain,
            "Domain contains suspicious patterns",
        ));
    }

    Ok(())
}

/// Validate an article title.
pub fn validate_title(title: &str) -> Result<(), RejectionReason> {
    let title = title.trim();
    if title.is_empty() {
        return Err(RejectionReason::format(Field::Title, "Title is required"));
    }

    let len = title.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(RejectionReason::format(
            Field::Title,
            format!("Title too long (max {} characters)", MAX_TITLE_LENGTH),
        ));
    }
    if len < MIN_TITLE_LENGTH {
        return Err(RejectionReason::format(
            Field::Title,
            format!("Title too short (minimum {} characters)", MIN_TITLE_LENGTH),
        ));
    }

    if contains_dangerous_pattern(title) {
        return Err(RejectionReason::security(
            Field::Title,
            "Title contains suspicious patterns",
        ));
    }

    Ok(())
}

fn is_suspicious_char(c: char) -> bool {
    matches!(c, '<' | '>' | '{' | '}' | '[' | ']' | '\\' | '`' | '$')
}

/// Validate article content for security and quality.
pub fn validate_article_content(content: &str) -> Result<(), RejectionReason> {
    let content = content.trim();
    if content.is_empty() {
        return Err(RejectionReason::format(Field::Body, "Article content is required"));
    }

    let len = content.chars().count();
    if len > MAX_BODY_LENGTH {
        return Err(RejectionReason::format(
            Field::Body,
            format!("Article too long (max {} characters)", MAX_BODY_LENGTH),
        ));
    }
    if len < MIN_BODY_LENGTH {
        return Err(RejectionReason::format(
            Field::Body,
            format!("Article too short (minimum {} characters)", MIN_BODY_LENGTH),
        ));
    }

    let suspicious = content.chars().filter(|&c| is_suspicious_char(c)).count();
    if suspicious as f64 > len as f64 * SUSPICIOUS_CHAR_RATIO {
        return Err(RejectionReason::security(
            Field::Body,
            "Content contains too many suspicious characters",
        ));
    }

    if is_spammy(content) {
        return Err(RejectionReason::SpamSuspected);
    }

    if content
        .split_whitespace()
        .any(|word| word.chars().count() > MAX_WORD_LENGTH)
    {
        return Err(RejectionReason::security(
            Field::Body,
            "Content contains suspiciously long words",
        ));
    }

    Ok(())
}

/// Run every check on a submission.
///
/// Blank fields short-circuit with a single `MissingField` reason naming all
/// of them (domain, title, body order). Otherwise the three field checks run
/// independently and their reasons are concatenated.
pub fn comprehensive_validation(submission: &RawSubmission) -> ValidationOutcome {
    let fields = [
        (Field::Domain, submission.domain.trim()),
        (Field::Title, submission.title.trim()),
        (Field::Body, submission.body.trim()),
    ];

    let missing: Vec<Field> = fields
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| *field)
        .collect();
    if !missing.is_empty() {
        return ValidationOutcome::from_reasons(vec![RejectionReason::MissingField(missing)]);
    }

    let reasons = [
        validate_domain(fields[0].1),
        validate_title(fields[1].1),
        validate_article_content(fields[2].1),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect();

    ValidationOutcome::from_reasons(reasons)
}
