//! Router assembly.

use crate::http::handlers;
use axum::Router;
use axum::routing::{get, post};
use intake_application::NextQuestionUseCase;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state injected into every handler.
///
/// Everything inside is read-only after startup, so cloning the state per
/// request is a couple of `Arc` bumps.
#[derive(Clone)]
pub struct AppState {
    pub use_case: Arc<NextQuestionUseCase>,
}

/// Build the application router.
///
/// CORS is fully permissive, matching the front-end deployment this
/// service was written for.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/question", post(handlers::next_question))
        .route("/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::types::{ErrorBody, QuestionResponse};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use intake_application::ports::rephrase::{RephraseError, RephraseGateway};
    use intake_domain::{BankBuilder, RawQuestionRow};
    use tower::ServiceExt;

    struct EchoGateway;

    #[async_trait]
    impl RephraseGateway for EchoGateway {
        async fn rephrase(
            &self,
            question: &str,
            _previous_context: &str,
        ) -> Result<String, RephraseError> {
            Ok(format!("rephrased: {question}"))
        }
    }

    struct DownGateway;

    #[async_trait]
    impl RephraseGateway for DownGateway {
        async fn rephrase(&self, _: &str, _: &str) -> Result<String, RephraseError> {
            Err(RephraseError::ConnectionError("refused".to_string()))
        }
    }

    fn test_router(gateway: Arc<dyn RephraseGateway>) -> Router {
        let (bank, _) = BankBuilder::new()
            .extend([
                RawQuestionRow::new(
                    "1",
                    "Eerste vraag",
                    vec!["a".to_string(), "b".to_string()],
                    None,
                ),
                RawQuestionRow::new("2", "Tweede vraag", vec![], Some("1=b".to_string())),
            ])
            .build();
        let use_case = Arc::new(NextQuestionUseCase::new(Arc::new(bank), gateway));
        create_router(AppState { use_case })
    }

    fn question_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/question")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_question_success() {
        let router = test_router(Arc::new(EchoGateway));

        let response = router
            .oneshot(question_request(r#"{"question_index": 1}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: QuestionResponse = body_json(response).await;
        assert_eq!(body.rephrased_question, "rephrased: Eerste vraag");
        assert_eq!(body.quick_reply_options, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_question_condition_met() {
        let router = test_router(Arc::new(EchoGateway));

        let response = router
            .oneshot(question_request(
                r#"{"question_index": 2, "previous_question": "Eerste vraag", "previous_answer": "b"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: QuestionResponse = body_json(response).await;
        assert_eq!(body.rephrased_question, "rephrased: Tweede vraag");
    }

    #[tokio::test]
    async fn test_missing_index_is_bad_request() {
        let router = test_router(Arc::new(EchoGateway));

        let response = router.oneshot(question_request(r#"{}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = body_json(response).await;
        assert_eq!(body.detail, "Invalid question index");
    }

    #[tokio::test]
    async fn test_zero_and_negative_index_are_bad_request() {
        for body in [r#"{"question_index": 0}"#, r#"{"question_index": -3}"#] {
            let router = test_router(Arc::new(EchoGateway));
            let response = router.oneshot(question_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_exhausted_flow_is_bad_request() {
        let router = test_router(Arc::new(EchoGateway));

        // Position 2 with an unmet condition and nothing after it.
        let response = router
            .oneshot(question_request(
                r#"{"question_index": 2, "previous_answer": "a"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = body_json(response).await;
        assert_eq!(body.detail, "No suitable question found");
    }

    #[tokio::test]
    async fn test_rephrase_failure_is_bad_gateway() {
        let router = test_router(Arc::new(DownGateway));

        let response = router
            .oneshot(question_request(r#"{"question_index": 1}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body: ErrorBody = body_json(response).await;
        assert_eq!(body.detail, "Rephrase service unavailable");
    }

    #[tokio::test]
    async fn test_health_reports_bank_size() {
        let router = test_router(Arc::new(EchoGateway));

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["questions"], 2);
    }
}
