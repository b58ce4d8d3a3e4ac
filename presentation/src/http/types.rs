//! API request/response types and error mapping.
//!
//! The wire contract mirrors the front-end the service was built for:
//! errors carry a `detail` field, an invalid index and an exhausted flow
//! both answer 400, and a failing rephrase deployment answers 502.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use intake_application::NextQuestionError;
use serde::{Deserialize, Serialize};

/// Body of `POST /question`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    /// 1-based position to resolve from. Required; values below 1 are
    /// rejected.
    pub question_index: Option<i64>,
    pub previous_question: Option<String>,
    pub previous_answer: Option<String>,
}

/// Successful answer of `POST /question`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub rephrased_question: String,
    pub quick_reply_options: Vec<String>,
}

/// Health probe payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub questions: usize,
}

/// Error body, FastAPI style.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Request-level failure mapped onto an HTTP status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn invalid_index() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: "Invalid question index".to_string(),
        }
    }

    pub fn no_question_found() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: "No suitable question found".to_string(),
        }
    }

    pub fn rephrase_unavailable() -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            detail: "Rephrase service unavailable".to_string(),
        }
    }
}

impl From<NextQuestionError> for ApiError {
    fn from(error: NextQuestionError) -> Self {
        match error {
            NextQuestionError::InvalidPosition(_) => ApiError::invalid_index(),
            NextQuestionError::Exhausted(_) => ApiError::no_question_found(),
            NextQuestionError::RephraseFailed(_) => ApiError::rephrase_unavailable(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}
