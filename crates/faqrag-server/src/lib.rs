//! Axum HTTP surface for the FAQRAG pipeline
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Redirect to `/docs`. |
//! | `GET`  | `/docs` | JSON description of the API. |
//! | `GET`  | `/health` | Liveness check, always `200 OK`. |
//! | `POST` | `/rag_aws_bedrock` | Answer a question from the FAQ index. |

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;

use faqrag_core::{AnswerResult, AnswerService, Error};

/// Shared state injected into every handler via the `State` extractor.
///
/// The answer service is built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    service: Arc<dyn AnswerService>,
}

impl AppState {
    /// Create a new `AppState` wrapping the given answer service
    pub fn new(service: Arc<dyn AnswerService>) -> Self {
        Self { service }
    }
}

/// Request body for the answering route
#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
    /// Optional generation-model alternative name
    pub model: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// HTTP-facing wrapper mapping pipeline errors onto status codes
struct ApiError(Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Error::Upstream(_) | Error::Network(_) | Error::Timeout(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the router for the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(redirect_root_to_docs))
        .route("/docs", get(docs))
        .route("/health", get(health))
        .route("/rag_aws_bedrock", post(answer))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the address and serve the router until shutdown
pub async fn serve(addr: &str, state: AppState) -> faqrag_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "faqrag server listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn redirect_root_to_docs() -> Redirect {
    Redirect::to("/docs")
}

async fn docs() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "faqrag",
        "routes": {
            "POST /rag_aws_bedrock": {
                "body": {
                    "question": "the question to answer",
                    "model": "optional generation-model alternative name",
                },
                "response": {
                    "answer": "generated answer",
                    "sources": "source deep links aligned with context",
                    "context": "retrieved documents",
                },
            },
            "GET /health": "liveness check",
        },
    }))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn answer(
    State(state): State<AppState>,
    Json(request): Json<QuestionRequest>,
) -> Result<Json<AnswerResult>, ApiError> {
    let result = state
        .service
        .answer(&request.question, request.model.as_deref())
        .await
        .map_err(|e| {
            warn!(error = %e, "answer request failed");
            ApiError(e)
        })?;

    Ok(Json(result))
}
