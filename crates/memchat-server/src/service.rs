//! Chat orchestration.
//!
//! One exchange runs: lock session → build prompt (evicting old turns in
//! place) → generate on a blocking worker with the user-turn stop predicate →
//! extract the reply → append the turn. A failed generation commits nothing.

use std::sync::Arc;

use memchat_engine::{ChatEngine, EngineError, SamplingParams};
use memchat_memory::{PromptBuilder, ReplyExtractor, SessionStore, StoreStats, Turn, UserTurnStop};
use memchat_runtime::{Device, InferenceMetrics, InferenceTimer, TelemetryHook, TracingTelemetry};
use tokio::task;
use uuid::Uuid;

use crate::error::ServerError;
use crate::models::{AllChatsResponse, ChatRequest, ChatResponse, UserChatsResponse};
use crate::state::ServerConfig;

/// Owns the session store and drives the engine for each chat request.
pub struct ChatService {
    engine: Arc<dyn ChatEngine>,
    store: SessionStore,
    builder: PromptBuilder,
    telemetry: Arc<dyn TelemetryHook>,
    device: Device,
    max_context_tokens: usize,
}

/// Output of one generation call, decoded.
struct Generation {
    /// The prompt as the engine actually saw it (post-truncation).
    prompt_text: String,
    /// Prompt plus continuation.
    raw: String,
    metrics: InferenceMetrics,
}

impl ChatService {
    pub fn new(engine: Arc<dyn ChatEngine>, config: &ServerConfig) -> Self {
        Self {
            engine,
            store: SessionStore::new(),
            builder: PromptBuilder::new().with_max_memory_turns(config.max_memory_turns),
            telemetry: Arc::new(TracingTelemetry),
            device: config.device,
            max_context_tokens: config.max_context_tokens,
        }
    }

    /// Replace the telemetry hook.
    pub fn with_telemetry(mut self, hook: Arc<dyn TelemetryHook>) -> Self {
        self.telemetry = hook;
        self
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn engine(&self) -> &Arc<dyn ChatEngine> {
        &self.engine
    }

    /// Run one chat exchange.
    #[tracing::instrument(
        name = "chat",
        skip_all,
        fields(request_id = %Uuid::new_v4(), user_id = %req.user_id, session_id = %req.session_id)
    )]
    pub async fn chat(&self, req: ChatRequest) -> Result<ChatResponse, ServerError> {
        req.validate()?;
        let params = req.generation_params()?;

        let _session = self.store.lock_session(&req.user_id, &req.session_id).await;

        let prompt = self
            .store
            .with_history(&req.user_id, &req.session_id, |history| {
                self.builder.build(&req.message, history)
            });

        let generation = self.generate(prompt, params.into()).await?;

        let reply = ReplyExtractor::strip_stop_marker(&ReplyExtractor::extract_after_prompt(
            &generation.prompt_text,
            &generation.raw,
        ));

        let history = self.store.append_bounded(
            &req.user_id,
            &req.session_id,
            Turn::new(req.message, reply.clone()),
            self.builder.max_memory_turns(),
        );
        tracing::info!(
            turns = history.len(),
            reply_chars = reply.chars().count(),
            "turn committed"
        );

        Ok(ChatResponse {
            response: reply,
            history,
            params,
            latency_sec: generation.metrics.latency_sec,
            meta: self.engine.info().into(),
        })
    }

    /// Sessions of one user. Read-only: unknown users yield an empty map.
    pub fn sessions(&self, user_id: &str) -> UserChatsResponse {
        UserChatsResponse {
            user_id: user_id.to_string(),
            sessions: self.store.list_sessions(user_id),
        }
    }

    /// Every user's sessions.
    pub fn all_sessions(&self) -> AllChatsResponse {
        AllChatsResponse {
            all_users: self.store.list_all(),
        }
    }

    pub fn stats(&self) -> StoreStats {
        self.store.stats()
    }

    async fn generate(&self, prompt: String, sampling: SamplingParams) -> Result<Generation, ServerError> {
        let engine = Arc::clone(&self.engine);
        let telemetry = Arc::clone(&self.telemetry);
        let device = self.device;
        let max_context_tokens = self.max_context_tokens;

        task::spawn_blocking(move || -> Result<Generation, EngineError> {
            let prompt_tokens = engine.tokenize(&prompt, max_context_tokens)?;
            let timer = InferenceTimer::start(device, prompt_tokens.len(), telemetry);

            let output = engine.generate(&prompt_tokens, &sampling, &UserTurnStop)?;
            let prompt_text = engine.detokenize(&prompt_tokens)?;
            let raw = engine.detokenize(&output)?;

            let metrics = timer.finish(output.len().saturating_sub(prompt_tokens.len()));
            Ok(Generation {
                prompt_text,
                raw,
                metrics,
            })
        })
        .await
        .map_err(|e| ServerError::Worker(format!("task join: {e}")))?
        .map_err(ServerError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memchat_runtime::{LogTelemetry, MockEngine};

    fn service_with(engine: MockEngine) -> ChatService {
        ChatService::new(Arc::new(engine), &ServerConfig::default())
    }

    #[tokio::test]
    async fn reply_is_extracted_and_committed() {
        let service = service_with(MockEngine::new().with_script([" Hello Alice!\nUser:"]));
        let resp = service
            .chat(ChatRequest::new("alice", "s1", "my name is Alice"))
            .await
            .unwrap();

        assert_eq!(resp.response, "Hello Alice!");
        assert_eq!(resp.history.turns(), &[Turn::new("my name is Alice", "Hello Alice!")]);
        assert_eq!(resp.params.max_new_tokens, 200);
        assert!(resp.latency_sec >= 0.0);
    }

    #[tokio::test]
    async fn history_feeds_the_next_prompt() {
        let service = service_with(MockEngine::new());
        service
            .chat(ChatRequest::new("bob", "s", "first question"))
            .await
            .unwrap();
        let resp = service
            .chat(ChatRequest::new("bob", "s", "second question"))
            .await
            .unwrap();

        assert_eq!(resp.response, "You said: second question");
        assert_eq!(resp.history.len(), 2);
        assert_eq!(resp.history.turns()[0].assistant, "You said: first question");
    }

    #[tokio::test]
    async fn telemetry_hook_sees_generation() {
        let log = LogTelemetry::new();
        let service = service_with(MockEngine::new().with_script([" ok"]))
            .with_telemetry(Arc::new(log.clone()));
        service
            .chat(ChatRequest::new("u", "s", "ping the server"))
            .await
            .unwrap();

        let metrics = log.last_metrics().unwrap();
        assert_eq!(metrics.generated_tokens, 3);
        assert!(metrics.prompt_tokens > 0);
    }

    #[tokio::test]
    async fn invalid_request_touches_nothing() {
        let service = service_with(MockEngine::new());
        let err = service.chat(ChatRequest::new("", "s", "hi")).await.unwrap_err();
        assert!(matches!(err, ServerError::InvalidRequest(_)));
        assert_eq!(service.stats(), StoreStats::default());
    }

    #[tokio::test]
    async fn listing_does_not_create_sessions() {
        let service = service_with(MockEngine::new());
        assert!(service.sessions("nobody").sessions.is_empty());
        assert!(service.all_sessions().all_users.is_empty());
    }
}
