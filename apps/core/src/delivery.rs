//! Hand-off of delivery payloads to an external target.
//!
//! The record is final before delivery starts: a failed delivery is reported
//! alongside the record, never instead of it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::error::AppError;
use crate::models::DeliveryPayload;

/// Base delay between webhook attempts; attempt `n` waits `n` times this.
const RETRY_DELAY_MS: u64 = 250;

/// Result of a successful delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// Attempts made, including the successful one
    pub attempts: u32,
    /// HTTP status of the accepted attempt, if the sink speaks HTTP
    pub status: Option<u16>,
}

/// Delivery outcome as reported to the submitter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub delivered: bool,
    pub attempts: u32,
    pub error: Option<String>,
}

impl DeliveryReport {
    pub fn from_result(result: &Result<DeliveryReceipt, AppError>) -> Self {
        match result {
            Ok(receipt) => Self {
                delivered: true,
                attempts: receipt.attempts,
                error: None,
            },
            Err(e) => Self {
                delivered: false,
                attempts: 0,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Defines the interface for a delivery target.
///
/// Implementations may be swapped freely (webhook, no-op, test doubles).
#[async_trait]
pub trait DeliverySink: Send + Sync + 'static {
    /// Deliver one payload.
    async fn deliver(&self, payload: &DeliveryPayload) -> Result<DeliveryReceipt, AppError>;
}

/// Sink used when no target is configured. Logs and discards.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

#[async_trait]
impl DeliverySink for NoopSink {
    async fn deliver(&self, payload: &DeliveryPayload) -> Result<DeliveryReceipt, AppError> {
        debug!(domain = %payload.domain, "No delivery target configured, payload discarded");
        Ok(DeliveryReceipt {
            attempts: 0,
            status: None,
        })
    }
}

/// POSTs payloads as JSON to a webhook.
///
/// Each attempt is bounded by the client timeout. Transport errors and 5xx
/// responses are retried up to `max_retries` times with linear backoff;
/// 4xx responses fail immediately.
#[derive(Debug, Clone)]
pub struct WebhookSink {
    client: reqwest::Client,
    url: Url,
    max_retries: u32,
    retry_delay: Duration,
}

impl WebhookSink {
    pub fn new(url: Url, timeout: Duration, max_retries: u32) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            max_retries,
            retry_delay: Duration::from_millis(RETRY_DELAY_MS),
        })
    }

    /// Override the base backoff delay
    pub fn with_backoff(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn attempt(&self, payload: &DeliveryPayload) -> Result<u16, AttemptError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| AttemptError::Retryable(AppError::from(e)))?;

        let status = response.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else if status.is_server_error() {
            Err(AttemptError::Retryable(AppError::Delivery(format!(
                "Webhook returned {}",
                status
            ))))
        } else {
            Err(AttemptError::Fatal(AppError::Delivery(format!(
                "Webhook rejected payload with {}",
                status
            ))))
        }
    }
}

enum AttemptError {
    Retryable(AppError),
    Fatal(AppError),
}

#[async_trait]
impl DeliverySink for WebhookSink {
    async fn deliver(&self, payload: &DeliveryPayload) -> Result<DeliveryReceipt, AppError> {
        let mut retries = 0;

        loop {
            match self.attempt(payload).await {
                Ok(status) => {
                    info!(url = %self.url, status, attempts = retries + 1, "Payload delivered");
                    return Ok(DeliveryReceipt {
                        attempts: retries + 1,
                        status: Some(status),
                    });
                }
                Err(AttemptError::Retryable(e)) if retries < self.max_retries => {
                    retries += 1;
                    warn!(
                        error = %e,
                        retry = retries,
                        max_retries = self.max_retries,
                        "Delivery failed, retrying..."
                    );
                    sleep(self.retry_delay * retries).await;
                }
                Err(AttemptError::Retryable(e)) | Err(AttemptError::Fatal(e)) => {
                    error!(error = %e, attempts = retries + 1, "Delivery failed");
                    return Err(e);
                }
            }
        }
    }
}
