//! Request handlers.

use crate::http::router::AppState;
use crate::http::types::{ApiError, HealthResponse, QuestionRequest, QuestionResponse};
use axum::Json;
use axum::extract::State;
use intake_application::NextQuestionInput;
use tracing::info;

/// `POST /question`: resolve and rephrase the next question.
pub async fn next_question(
    State(state): State<AppState>,
    Json(request): Json<QuestionRequest>,
) -> Result<Json<QuestionResponse>, ApiError> {
    info!(
        index = request.question_index,
        answer = request.previous_answer.as_deref().unwrap_or(""),
        "Received question request"
    );

    // The position must be a valid 1-based index before it reaches the
    // resolver; negative values cannot be represented there.
    let position = match request.question_index {
        Some(index) if index >= 1 => index as usize,
        _ => return Err(ApiError::invalid_index()),
    };

    let input = NextQuestionInput {
        current_position: position,
        previous_question: request.previous_question,
        previous_answer: request.previous_answer,
    };

    let output = state.use_case.execute(input).await?;

    Ok(Json(QuestionResponse {
        rephrased_question: output.rephrased_text,
        quick_reply_options: output.quick_reply_options,
    }))
}

/// `GET /health`: liveness probe with the bank size.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        questions: state.use_case.bank().len(),
    })
}
