//! Chat request/response types.

use memchat_engine::{ModelInfo, SamplingParams};
use memchat_memory::SessionHistory;
use serde::{Deserialize, Serialize};

use crate::{error::ServerError, presets};

/// `POST /chat` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub session_id: String,
    pub message: String,
    /// Named preset supplying defaults for the sampling fields below.
    #[serde(default)]
    pub preset: Option<String>,
    pub max_new_tokens: Option<usize>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub repetition_penalty: Option<f32>,
}

impl ChatRequest {
    /// Minimal request with default sampling.
    pub fn new(
        user_id: impl Into<String>,
        session_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: session_id.into(),
            message: message.into(),
            preset: None,
            max_new_tokens: None,
            temperature: None,
            top_p: None,
            repetition_penalty: None,
        }
    }

    /// Reject requests that cannot address a session.
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.user_id.is_empty() {
            return Err(ServerError::InvalidRequest("user_id must not be empty".to_string()));
        }
        if self.session_id.is_empty() {
            return Err(ServerError::InvalidRequest("session_id must not be empty".to_string()));
        }
        Ok(())
    }

    /// Resolve sampling parameters: explicit field, then preset, then default.
    pub fn generation_params(&self) -> Result<GenerationParams, ServerError> {
        let base = match &self.preset {
            Some(key) => {
                presets::find(key)
                    .ok_or_else(|| ServerError::UnknownPreset(key.clone()))?
                    .params
            }
            None => GenerationParams::default(),
        };

        Ok(GenerationParams {
            max_new_tokens: self.max_new_tokens.unwrap_or(base.max_new_tokens),
            temperature: self.temperature.unwrap_or(base.temperature),
            top_p: self.top_p.unwrap_or(base.top_p),
            repetition_penalty: self.repetition_penalty.unwrap_or(base.repetition_penalty),
        })
    }
}

/// Caller-tunable sampling parameters, echoed back in every response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_new_tokens: usize,
    pub temperature: f32,
    pub top_p: f32,
    pub repetition_penalty: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        let defaults = SamplingParams::default();
        Self {
            max_new_tokens: defaults.max_new_tokens,
            temperature: defaults.temperature,
            top_p: defaults.top_p,
            repetition_penalty: defaults.repetition_penalty,
        }
    }
}

impl From<GenerationParams> for SamplingParams {
    fn from(params: GenerationParams) -> Self {
        SamplingParams {
            max_new_tokens: params.max_new_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
            repetition_penalty: params.repetition_penalty,
            ..SamplingParams::default()
        }
    }
}

/// Model identity reported with each reply.
#[derive(Debug, Clone, Serialize)]
pub struct ModelMeta {
    pub model: String,
    pub device: String,
    pub dtype: String,
}

impl From<ModelInfo> for ModelMeta {
    fn from(info: ModelInfo) -> Self {
        Self {
            model: info.model,
            device: info.device,
            dtype: info.dtype,
        }
    }
}

/// `POST /chat` response body.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub history: SessionHistory,
    pub params: GenerationParams,
    pub latency_sec: f64,
    pub meta: ModelMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_given() {
        let req = ChatRequest::new("u", "s", "hi");
        assert_eq!(
            req.generation_params().unwrap(),
            GenerationParams {
                max_new_tokens: 200,
                temperature: 0.7,
                top_p: 0.9,
                repetition_penalty: 1.1,
            }
        );
    }

    #[test]
    fn explicit_fields_override_preset() {
        let req = ChatRequest {
            preset: Some("concise_answer".to_string()),
            temperature: Some(0.05),
            ..ChatRequest::new("u", "s", "hi")
        };
        let params = req.generation_params().unwrap();
        assert_eq!(params.max_new_tokens, 100);
        assert_eq!(params.temperature, 0.05);
        assert_eq!(params.repetition_penalty, 1.05);
    }

    #[test]
    fn unknown_preset_is_rejected() {
        let req = ChatRequest {
            preset: Some("poetry_slam".to_string()),
            ..ChatRequest::new("u", "s", "hi")
        };
        assert!(matches!(
            req.generation_params(),
            Err(ServerError::UnknownPreset(key)) if key == "poetry_slam"
        ));
    }

    #[test]
    fn empty_ids_fail_validation() {
        assert!(ChatRequest::new("", "s", "hi").validate().is_err());
        assert!(ChatRequest::new("u", "", "hi").validate().is_err());
        assert!(ChatRequest::new("u", "s", "").validate().is_ok());
    }

    #[test]
    fn deserializes_with_only_required_fields() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"user_id": "alice", "session_id": "s1", "message": "hello"}"#,
        )
        .unwrap();
        assert!(req.preset.is_none());
        assert!(req.max_new_tokens.is_none());
    }

    #[test]
    fn sampling_params_keep_engine_defaults() {
        let sampling: SamplingParams = GenerationParams {
            max_new_tokens: 10,
            temperature: 1.5,
            top_p: 0.5,
            repetition_penalty: 2.0,
        }
        .into();
        assert_eq!(sampling.max_new_tokens, 10);
        assert_eq!(sampling.top_k, 50);
        assert!(sampling.do_sample);
    }
}
