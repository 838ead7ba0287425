// Intake Core Library
// Vetted ingestion and corpus-free text analysis for untrusted submissions

pub mod brain;
pub mod config;
pub mod delivery;
pub mod error;
pub mod guard;
pub mod models;
pub mod pipeline;
pub mod record;
pub mod server;
pub mod telemetry;

pub use error::AppError;
pub use models::{AnalysisResult, RawSubmission, Record, SanitizedSubmission};
pub use pipeline::{Pipeline, PipelineError, PipelineSettings};

#[cfg(test)]
mod tests;
