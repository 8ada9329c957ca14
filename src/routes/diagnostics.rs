use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// Fixed body of `/test` and `/create_table`, unchanged for existing clients.
pub const DIAGNOSTIC_MESSAGE: &str = "this is our test massage";

pub fn diagnostic_routes() -> Router<AppState> {
    Router::new()
        .route("/test", get(test_message))
        .route("/health", get(health))
}

pub async fn test_message() -> &'static str {
    DIAGNOSTIC_MESSAGE
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME")
    }))
}
