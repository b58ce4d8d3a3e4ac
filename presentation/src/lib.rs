//! Presentation layer for intake-flow
//!
//! This crate exposes the flow engine over HTTP: request/response DTOs,
//! error-to-status mapping, and the axum router with its CORS layer.

pub mod http;

// Re-export commonly used types
pub use http::{
    router::{AppState, create_router},
    types::{QuestionRequest, QuestionResponse},
};
