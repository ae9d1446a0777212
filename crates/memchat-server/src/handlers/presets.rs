//! Preset listing handler.

use axum::Json;

use crate::{models::PresetsResponse, presets};

/// Handle `GET /presets`.
pub async fn handle_presets() -> Json<PresetsResponse> {
    Json(PresetsResponse {
        presets: presets::all(),
    })
}
