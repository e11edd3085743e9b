//! Health check endpoint

use axum::Json;
use axum::extract::State;
use http::StatusCode;
use serde_json::{Value, json};

use crate::state::AppState;

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let backend = state.gateway.backend_name();
    match state.gateway.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": "crab-merchant",
                "version": env!("CARGO_PKG_VERSION"),
                "database": backend,
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, backend, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "service": "crab-merchant",
                    "version": env!("CARGO_PKG_VERSION"),
                    "database": backend,
                })),
            )
        }
    }
}
