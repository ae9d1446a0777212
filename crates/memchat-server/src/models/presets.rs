//! Preset listing response.

use serde::Serialize;

use crate::presets::Preset;

/// `GET /presets`.
#[derive(Debug, Serialize)]
pub struct PresetsResponse {
    pub presets: &'static [Preset],
}
