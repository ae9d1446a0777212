//! Health check handler.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// Handle health check requests. Includes session store stats.
pub async fn handle_health(State(state): State<AppState>) -> Json<Value> {
    let stats = state.chat.stats();
    Json(json!({
        "status": "ok",
        "model": state.chat.engine().info().model,
        "started_at": state.started_at.to_rfc3339(),
        "store": {
            "users": stats.users,
            "sessions": stats.sessions,
            "turns": stats.turns,
        }
    }))
}
