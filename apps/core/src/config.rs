use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use url::Url;
use validator::Validate;

use crate::brain::{AnalyzerSettings, DEFAULT_MAX_KEYWORDS, DEFAULT_MAX_PHRASES, DEFAULT_SUMMARY_SENTENCES};
use crate::error::AppError;
use crate::guard::SanitizeMode;
use crate::pipeline::PipelineSettings;
use crate::telemetry::LogFormat;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_WEBHOOK_MAX_RETRIES: u32 = 2;

/// Service configuration, read from the environment.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,
    /// Delivery target. Without one, payloads are discarded after processing.
    #[validate(url)]
    pub webhook_url: Option<String>,
    /// Per-attempt webhook timeout, in seconds.
    #[validate(range(min = 1, max = 120))]
    pub webhook_timeout_secs: u64,
    /// Retries after the first failed webhook attempt.
    #[validate(range(min = 0, max = 10))]
    pub webhook_max_retries: u32,
    /// Sanitization applied to the body before analytics.
    pub analysis_mode: SanitizeMode,
    #[validate(range(min = 1, max = 20))]
    pub summary_sentences: usize,
    #[validate(range(min = 1, max = 100))]
    pub max_keywords: usize,
    #[validate(range(min = 1, max = 50))]
    pub max_phrases: usize,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            webhook_url: None,
            webhook_timeout_secs: DEFAULT_WEBHOOK_TIMEOUT_SECS,
            webhook_max_retries: DEFAULT_WEBHOOK_MAX_RETRIES,
            analysis_mode: SanitizeMode::default(),
            summary_sentences: DEFAULT_SUMMARY_SENTENCES,
            max_keywords: DEFAULT_MAX_KEYWORDS,
            max_phrases: DEFAULT_MAX_PHRASES,
            log_format: LogFormat::default(),
        }
    }
}

/// Read `key`, falling back to `default` when unset or blank.
fn env_or<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} is invalid: {}", key, e))),
        _ => Ok(default),
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the environment.
    pub fn load() -> Result<Self, AppError> {
        // Load .env file if present (development)
        let _ = dotenv::dotenv();
        Self::from_env()
    }

    /// Read configuration from process environment variables and validate it.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let config = Self {
            bind_addr: env_or("INTAKE_BIND_ADDR", defaults.bind_addr)?,
            webhook_url: env::var("INTAKE_WEBHOOK_URL")
                .ok()
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            webhook_timeout_secs: env_or("INTAKE_WEBHOOK_TIMEOUT_SECS", defaults.webhook_timeout_secs)?,
            webhook_max_retries: env_or("INTAKE_WEBHOOK_MAX_RETRIES", defaults.webhook_max_retries)?,
            analysis_mode: env_or("INTAKE_ANALYSIS_MODE", defaults.analysis_mode)?,
            summary_sentences: env_or("INTAKE_SUMMARY_SENTENCES", defaults.summary_sentences)?,
            max_keywords: env_or("INTAKE_MAX_KEYWORDS", defaults.max_keywords)?,
            max_phrases: env_or("INTAKE_MAX_PHRASES", defaults.max_phrases)?,
            log_format: env_or("LOG_FORMAT", defaults.log_format)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn webhook_timeout(&self) -> Duration {
        Duration::from_secs(self.webhook_timeout_secs)
    }

    /// Parsed delivery target, if one is configured.
    pub fn webhook(&self) -> Result<Option<Url>, AppError> {
        self.webhook_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(AppError::from)
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            analysis_mode: self.analysis_mode,
            analyzer: AnalyzerSettings {
                summary_sentences: self.summary_sentences,
                max_keywords: self.max_keywords,
                max_phrases: self.max_phrases,
            },
        }
    }
}
