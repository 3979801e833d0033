//! Dispatch endpoints.
//!
//! - `POST /schedule` - HTTP status and body taken from the envelope
//! - `POST /invoke` - Lambda-style: always 200 with the envelope itself

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use locksmith_core::dispatch::DispatchResponse;

use crate::handlers::AppError;
use crate::state::AppState;

/// POST /schedule
#[axum::debug_handler]
pub async fn schedule(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let event: Value = serde_json::from_slice(&body)?;
    let envelope = state.dispatcher.handle(&event).await;
    Ok(envelope_to_response(envelope))
}

/// POST /invoke
#[axum::debug_handler]
pub async fn invoke(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DispatchResponse>, AppError> {
    let event: Value = serde_json::from_slice(&body)?;
    Ok(Json(state.dispatcher.handle(&event).await))
}

fn envelope_to_response(envelope: DispatchResponse) -> Response {
    let status =
        StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        envelope.body,
    )
        .into_response()
}
