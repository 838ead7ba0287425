use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::guard::RejectionReason;

/// An untrusted submission as received. Fields are free-form and may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSubmission {
    #[serde(default, alias = "companyDomain")]
    pub domain: String,
    #[serde(default, alias = "articleTitle")]
    pub title: String,
    #[serde(default, alias = "article")]
    pub body: String,
}

impl RawSubmission {
    pub fn new(
        domain: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            title: title.into(),
            body: body.into(),
        }
    }

    /// Build a submission from arbitrary JSON.
    ///
    /// Only objects are accepted. Each field is looked up under its primary
    /// key, then its legacy alias. `null` and absent values become blank;
    /// numbers and booleans become their textual form; arrays and objects
    /// become their JSON text.
    pub fn from_value(value: &Value) -> Result<Self, RejectionReason> {
        let object = value.as_object().ok_or(RejectionReason::InvalidDataShape)?;

        let field = |key: &str, alias: &str| -> String {
            [key, alias]
                .iter()
                .filter_map(|k| object.get(*k))
                .find(|v| !v.is_null())
                .map(coerce_text)
                .unwrap_or_default()
        };

        Ok(Self {
            domain: field("domain", "companyDomain"),
            title: field("title", "articleTitle"),
            body: field("body", "article"),
        })
    }
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Submission fields after sanitization and truncation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizedSubmission {
    pub domain: String,
    pub title: String,
    pub body: String,
}

/// Summary, keywords and phrases derived from one body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    /// Relevance-descending, unique
    pub keywords: Vec<String>,
    /// Relevance-descending, unique
    pub phrases: Vec<String>,
}

/// Submission metadata carried on every record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    pub domain: String,
    pub title: String,
    /// RFC 3339 processing time
    pub processed_at: String,
    /// Character count of the original body
    pub char_length: usize,
    /// Whitespace-token count of the original body
    pub word_count: usize,
}

/// Sanitized content and its analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordContent {
    pub title: String,
    pub body: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub phrases: Vec<String>,
}

/// Flat shape handed to the external delivery target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPayload {
    pub domain: String,
    pub title: String,
    pub body: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub phrases: Vec<String>,
    pub timestamp: String,
    pub word_count: usize,
    pub char_count: usize,
}

/// The structured result of processing one accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub metadata: RecordMetadata,
    pub content: RecordContent,
    pub delivery_payload: DeliveryPayload,
}
