//! Session listing handlers. Both are read-only and never create sessions.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    models::{AllChatsResponse, UserChatsResponse},
    state::AppState,
};

/// Handle `GET /get_chats/{user_id}`.
pub async fn handle_get_chats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<UserChatsResponse> {
    Json(state.chat.sessions(&user_id))
}

/// Handle `GET /get_all_chats`.
pub async fn handle_get_all_chats(State(state): State<AppState>) -> Json<AllChatsResponse> {
    Json(state.chat.all_sessions())
}
