use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{
        health::{healthz, livez},
        schedule::{invoke, schedule},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
///
/// Dispatch routes are bounded by the dispatcher's own deadline and always
/// answer with an envelope; only the health routes carry a timeout layer.
pub fn create_app(state: AppState) -> Router {
    let health = Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.request_timeout,
        ));

    Router::new()
        .route("/schedule", post(schedule))
        .route("/invoke", post(invoke))
        .merge(health)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
