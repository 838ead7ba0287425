//! Record assembly: sanitized fields plus analysis into the delivered shape.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::{
    AnalysisResult, DeliveryPayload, Record, RecordContent, RecordMetadata, SanitizedSubmission,
};

/// Combine a sanitized submission and its analysis into a [`Record`].
///
/// Length statistics describe `original_body`, the body as submitted.
/// No validation happens here.
pub fn assemble_record(
    sanitized: &SanitizedSubmission,
    analysis: &AnalysisResult,
    original_body: &str,
    processed_at: DateTime<Utc>,
) -> Record {
    let timestamp = processed_at.to_rfc3339_opts(SecondsFormat::Micros, false);
    let char_length = original_body.chars().count();
    let word_count = original_body.split_whitespace().count();

    Record {
        metadata: RecordMetadata {
            domain: sanitized.domain.clone(),
            title: sanitized.title.clone(),
            processed_at: timestamp.clone(),
            char_length,
            word_count,
        },
        content: RecordContent {
            title: sanitized.title.clone(),
            body: sanitized.body.clone(),
            summary: analysis.summary.clone(),
            keywords: analysis.keywords.clone(),
            phrases: analysis.phrases.clone(),
        },
        delivery_payload: DeliveryPayload {
            domain: sanitized.domain.clone(),
            title: sanitized.title.clone(),
            body: sanitized.body.clone(),
            summary: analysis.summary.clone(),
            keywords: analysis.keywords.clone(),
            phrases: analysis.phrases.clone(),
            timestamp,
            word_count,
            char_count: char_length,
        },
    }
}
