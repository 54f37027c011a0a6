use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Liveness only; never touches the completion backend.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "AriAI Assistant API is running"
    }))
}
