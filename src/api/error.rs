//! API Error Types
//!
//! Defines error types for the HTTP layer and implements conversion to
//! responses: a JSON error body for API routes and a generic failure page
//! for the dashboard itself.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::chain::ChainError;
use crate::history::HistoryError;
use crate::presenter::page::render_error;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Reading contract state failed
    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),

    /// Loading the NAV log failed
    #[error("History error: {0}")]
    History(#[from] HistoryError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Chain(_) => (StatusCode::BAD_GATEWAY, "CHAIN_ERROR"),
            ApiError::History(_) => (StatusCode::INTERNAL_SERVER_ERROR, "HISTORY_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }

    /// Log the error under a fresh request id and return that id
    fn log(&self, code: &str) -> String {
        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "Dashboard render failed"
        );

        request_id
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let request_id = self.log(code);

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Error rendered as the dashboard's HTML failure page
#[derive(Debug)]
pub struct PageError {
    pub error: ApiError,
    pub title: String,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, code) = self.error.status_and_code();
        let request_id = self.error.log(code);

        (status, Html(render_error(&self.title, &request_id))).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
