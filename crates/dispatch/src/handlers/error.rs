use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Errors raised before a request reaches the dispatcher.
#[derive(Debug)]
pub enum AppError {
    /// The request body is not JSON.
    InvalidBody(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidBody(detail) => {
                tracing::debug!(error = %detail, "Rejected request body");
                (
                    StatusCode::BAD_REQUEST,
                    Json(format!("Request body must be JSON: {detail}")),
                )
                    .into_response()
            }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidBody(err.to_string())
    }
}
