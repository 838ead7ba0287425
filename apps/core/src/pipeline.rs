//! Submission pipeline: validate, sanitize, analyze, assemble.
//!
//! Synchronous and stateless. A [`Pipeline`] only carries settings, so one
//! instance can be shared across any number of concurrent requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::brain::{AnalyzerSettings, TextAnalyzer};
use crate::guard::limits::MAX_BODY_LENGTH;
use crate::guard::{
    comprehensive_validation, sanitize, sanitize_submission, scan_threats, truncate_chars,
    RejectionReason, SanitizeMode,
};
use crate::models::{RawSubmission, Record};
use crate::record::assemble_record;

/// Pipeline settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Sanitization applied to the body before analytics
    pub analysis_mode: SanitizeMode,
    pub analyzer: AnalyzerSettings,
}

/// Why processing did not produce a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The submission failed admission; a normal outcome
    #[error("{}", join_reasons(.0))]
    Rejected(Vec<RejectionReason>),

    /// A fault inside the pipeline itself
    #[error("Internal error: {0}")]
    Internal(String),
}

fn join_reasons(reasons: &[RejectionReason]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl PipelineError {
    /// Human-readable reasons; empty for internal faults
    pub fn reasons(&self) -> Vec<String> {
        match self {
            PipelineError::Rejected(reasons) => reasons.iter().map(ToString::to_string).collect(),
            PipelineError::Internal(_) => vec![],
        }
    }
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(err: tokio::task::JoinError) -> Self {
        PipelineError::Internal(format!("Task failed: {}", err))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    settings: PipelineSettings,
    analyzer: TextAnalyzer,
}

impl Pipeline {
    pub fn new(settings: PipelineSettings) -> Self {
        Self {
            settings,
            analyzer: TextAnalyzer::with_settings(settings.analyzer),
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Process a JSON value. Anything other than an object is rejected.
    pub fn process_value(&self, value: &Value, now: DateTime<Utc>) -> Result<Record, PipelineError> {
        let raw = RawSubmission::from_value(value).map_err(|reason| {
            warn!("Rejected submission: {}", reason);
            PipelineError::Rejected(vec![reason])
        })?;
        self.process(&raw, now)
    }

    /// Process one submission into a record.
    pub fn process(&self, raw: &RawSubmission, now: DateTime<Utc>) -> Result<Record, PipelineError> {
        let outcome = comprehensive_validation(raw);
        if !outcome.accepted {
            let threats: Vec<&'static str> = [&raw.domain, &raw.title, &raw.body]
                .into_iter()
                .flat_map(|field| scan_threats(field))
                .map(|threat| threat.name)
                .collect();
            warn!(
                reasons = outcome.reasons.len(),
                ?threats,
                "Rejected submission: {}",
                join_reasons(&outcome.reasons)
            );
            return Err(PipelineError::Rejected(outcome.reasons));
        }

        let sanitized = sanitize_submission(raw);
        let analysis_input = match self.settings.analysis_mode {
            SanitizeMode::Stripped => sanitized.body.clone(),
            SanitizeMode::Escaped => {
                truncate_chars(&sanitize(&raw.body, SanitizeMode::Escaped), MAX_BODY_LENGTH)
            }
        };
        debug!(
            mode = ?self.settings.analysis_mode,
            chars = analysis_input.len(),
            "Analyzing sanitized body"
        );

        let analysis = self.analyzer.analyze(&analysis_input);
        let record = assemble_record(&sanitized, &analysis, &raw.body, now);

        info!(
            domain = %record.metadata.domain,
            words = record.metadata.word_count,
            keywords = analysis.keywords.len(),
            phrases = analysis.phrases.len(),
            "Submission processed"
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BODY: &str = "Electric vehicles are reshaping the automotive industry. \
        Battery technology improvements extend driving range every year. \
        Charging networks expand as electric vehicles gain market share. \
        Manufacturers invest billions in battery technology research.";

    #[test]
    fn test_process_accepts_valid_submission() {
        let pipeline = Pipeline::default();
        let raw = RawSubmission::new("example.com", "EV Market Update", BODY);
        let record = pipeline.process(&raw, Utc::now()).unwrap();

        assert_eq!(record.metadata.domain, "example.com");
        assert_eq!(record.content.title, "EV Market Update");
        assert!(!record.content.keywords.is_empty());
        assert!(record.content.summary.ends_with("..."));
    }

    #[test]
    fn test_process_rejects_with_all_reasons() {
        let pipeline = Pipeline::default();
        let raw = RawSubmission::new("bit.ly", "<script>alert(1)</script>", BODY);
        let err = pipeline.process(&raw, Utc::now()).unwrap_err();

        match &err {
            PipelineError::Rejected(reasons) => assert_eq!(reasons.len(), 2),
            other => panic!("Expected rejection, got {:?}", other),
        }
        assert_eq!(
            err.to_string(),
            "Domain validation failed: Domain appears to be suspicious; \
             Title validation failed: Title contains suspicious patterns"
        );
    }

    #[test]
    fn test_process_value_rejects_non_object() {
        let err = Pipeline::default()
            .process_value(&json!(["not", "an", "object"]), Utc::now())
            .unwrap_err();
        assert_eq!(err, PipelineError::Rejected(vec![RejectionReason::InvalidDataShape]));
        assert_eq!(err.reasons(), vec!["Invalid data format".to_string()]);
    }

    #[test]
    fn test_process_value_missing_fields() {
        let err = Pipeline::default()
            .process_value(&json!({}), Utc::now())
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields: domain, title, body");
    }

    #[test]
    fn test_analysis_mode_reaches_analyzer() {
        let body = format!("{} Fish &amp; chips remain popular in coastal tourism outlets.", BODY);
        let raw = RawSubmission::new("example.com", "EV Market Update", body);
        let analyzer = AnalyzerSettings {
            max_keywords: 100,
            ..AnalyzerSettings::default()
        };

        let stripped = Pipeline::new(PipelineSettings {
            analysis_mode: SanitizeMode::Stripped,
            analyzer,
        })
        .process(&raw, Utc::now())
        .unwrap();
        let escaped = Pipeline::new(PipelineSettings {
            analysis_mode: SanitizeMode::Escaped,
            analyzer,
        })
        .process(&raw, Utc::now())
        .unwrap();

        // Delivered content is always the stripped rendering
        assert_eq!(stripped.content.body, escaped.content.body);
        assert!(stripped.content.body.contains("Fish & chips"));

        // Escaped analytics see the re-encoded entity as words
        assert!(!stripped.content.keywords.contains(&"amp".to_string()));
        assert!(escaped.content.keywords.contains(&"amp".to_string()));
    }

    #[tokio::test]
    async fn test_panicked_task_is_internal() {
        let join_err = tokio::task::spawn_blocking::<_, ()>(|| panic!("analyzer blew up"))
            .await
            .unwrap_err();
        let err = PipelineError::from(join_err);
        assert!(matches!(err, PipelineError::Internal(_)));
        assert!(err.to_string().starts_with("Internal error: Task failed"));
    }

    #[test]
    fn test_error_display_for_internal() {
        assert_eq!(
            PipelineError::Internal("worker panicked".into()).to_string(),
            "Internal error: worker panicked"
        );
        assert!(PipelineError::Internal("x".into()).reasons().is_empty());
    }
}
