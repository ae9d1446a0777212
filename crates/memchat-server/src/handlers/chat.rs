//! Chat handler.

use axum::{extract::State, Json};

use crate::{
    error::ServerError,
    models::{ChatRequest, ChatResponse},
    state::AppState,
};

/// Handle `POST /chat`: one exchange against the caller's session memory.
///
/// Malformed bodies are rejected by the `Json` extractor before reaching the
/// service.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ServerError> {
    state.chat.chat(req).await.map(Json)
}
