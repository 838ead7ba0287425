//! HTTP shell around the pipeline.
//!
//! Routes live under `/api`. Processing runs on the blocking pool so a large
//! body never stalls the async workers.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::delivery::{DeliveryReport, DeliverySink, NoopSink, WebhookSink};
use crate::error::AppError;
use crate::guard::limits::MAX_BODY_LENGTH;
use crate::models::Record;
use crate::pipeline::{Pipeline, PipelineError};

/// Request body cap: the body ceiling plus room for JSON framing, escapes
/// and the other fields.
const REQUEST_BODY_LIMIT: usize = MAX_BODY_LENGTH * 8;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub sink: Arc<dyn DeliverySink>,
}

impl AppState {
    pub fn new(pipeline: Pipeline, sink: Arc<dyn DeliverySink>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            sink,
        }
    }

    /// Build state from configuration: pipeline settings and delivery target.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let sink: Arc<dyn DeliverySink> = match config.webhook()? {
            Some(url) => {
                info!(%url, "Delivering payloads to webhook");
                Arc::new(WebhookSink::new(
                    url,
                    config.webhook_timeout(),
                    config.webhook_max_retries,
                )?)
            }
            None => {
                warn!("No webhook configured, payloads will be discarded");
                Arc::new(NoopSink)
            }
        };
        Ok(Self::new(Pipeline::new(config.pipeline_settings()), sink))
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HelloResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EchoResponse {
    pub echo: Value,
}

/// Successful processing: the record plus the delivery outcome
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    #[serde(flatten)]
    pub record: Record,
    pub delivery: DeliveryReport,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

/// Handler error type
#[derive(Debug)]
pub enum ApiError {
    /// Submission refused; reasons are reported verbatim
    Rejected(Vec<String>),
    /// Body was not valid JSON
    MalformedJson(String),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Rejected(reasons) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: reasons.join("; "),
                    reasons,
                },
            ),
            ApiError::MalformedJson(detail) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid data format".to_string(),
                    reasons: vec![detail],
                },
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: msg,
                    reasons: vec![],
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Rejected(reasons) => {
                ApiError::Rejected(reasons.iter().map(ToString::to_string).collect())
            }
            PipelineError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

/// GET /api/health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "API is running".to_string(),
    })
}

/// GET /api/hello
async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello from the intake API!".to_string(),
    })
}

/// POST /api/echo - Returns the JSON body, or null when there is none
async fn echo(body: Bytes) -> Json<EchoResponse> {
    let echo = serde_json::from_slice(&body).unwrap_or(Value::Null);
    Json(EchoResponse { echo })
}

/// POST /api/process-article - Validate, sanitize, analyze and deliver
async fn process_article(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ProcessResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("process_article", %request_id);

    async move {
        let value: Value = serde_json::from_slice(&body).map_err(|e| {
            warn!(error = %e, "Malformed JSON body");
            ApiError::MalformedJson(e.to_string())
        })?;

        let pipeline = Arc::clone(&state.pipeline);
        let record = tokio::task::spawn_blocking(move || pipeline.process_value(&value, Utc::now()))
            .await
            .map_err(PipelineError::from)??;

        let delivery = DeliveryReport::from_result(&state.sink.deliver(&record.delivery_payload).await);
        info!(delivered = delivery.delivered, "Article processed");

        Ok::<_, ApiError>(Json(ProcessResponse { record, delivery }))
    }
    .instrument(span)
    .await
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/hello", get(hello))
        .route("/api/echo", post(echo))
        .route("/api/process-article", post(process_article))
        .layer(DefaultBodyLimit::max(REQUEST_BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: &AppConfig) -> Result<(), AppError> {
    let state = AppState::from_config(config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Intake API listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
