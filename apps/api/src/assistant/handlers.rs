//! Axum route handlers for the assistant API.

use axum::{extract::State, Json};
use tracing::info;

use crate::assistant::models::{ChatRequest, ChatResponse};
use crate::assistant::router::route;
use crate::errors::AppError;
use crate::llm_client::MODEL;
use crate::state::AppState;

/// POST /chat
///
/// Builds the prompt pair for the request's mode and returns the completion text verbatim.
/// A failed completion call surfaces as a 500; nothing is retried here.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let completion = route(&request);

    info!(
        mode = request.mode.as_str(),
        model = MODEL,
        temperature = completion.temperature,
        attachments = request.attachments.len(),
        "Routing chat request"
    );

    let response = state.llm.complete(&completion).await?;

    Ok(Json(ChatResponse { response }))
}
