//! Health check endpoints.
//!
//! - `/livez` - liveness probe (immediate 200, no checks)
//! - `/healthz` - backend names and lease usage

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /livez
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "backends": state.backends,
        "activeLeases": state.dispatcher.leases().active(),
    }))
}
