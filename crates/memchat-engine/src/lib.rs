//! # memchat-engine
//!
//! The "narrow waist" of the memchat stack. Defines the [`ChatEngine`] trait the
//! chat service drives, plus the sampling and stopping types that cross the
//! boundary. Everything behind the trait (tokenizer, forward pass, sampling loop)
//! is opaque to the service; swap a mock for a real backend without touching
//! application code.
//!
//! ## Design Notes
//!
//! ### Interior Mutability
//! `ChatEngine` methods take `&self` so a single engine can be shared behind an
//! `Arc` by every request handler. Backends that keep mutable state are
//! responsible for their own synchronization.
//!
//! ### Stopping
//! The engine owns the generation loop. Callers only supply a
//! [`StoppingCriteria`] predicate, which the engine evaluates against the
//! cumulative decoded text after each emitted token.

pub type Result<T> = std::result::Result<T, EngineError>;

/// Token ID type (i32 for FFI compat; logically non-negative).
pub type TokenId = i32;

/// Maximum number of prompt tokens handed to the engine.
pub const MAX_CONTEXT_TOKENS: usize = 1024;

/// Top-level error type for all engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Model loading failed: {0}")]
    ModelLoad(String),
    #[error("Tokenization failed: {0}")]
    Tokenization(String),
    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Sampling parameters forwarded to the engine's generation loop.
///
/// Values are passed through as-is; range checking is the backend's business.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    /// Upper bound on newly generated tokens.
    pub max_new_tokens: usize,
    /// Softmax temperature.
    pub temperature: f32,
    /// Nucleus sampling threshold.
    pub top_p: f32,
    /// Top-k cutoff.
    pub top_k: usize,
    /// Penalty applied to tokens already present in the sequence.
    pub repetition_penalty: f32,
    /// Sample from the distribution instead of taking the argmax.
    pub do_sample: bool,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 200,
            temperature: 0.7,
            top_p: 0.9,
            top_k: 50,
            repetition_penalty: 1.1,
            do_sample: true,
        }
    }
}

/// Predicate consulted by the engine after each generated token.
pub trait StoppingCriteria: Send + Sync {
    /// `text` is the cumulative decoded sequence, prompt included.
    fn should_stop(&self, text: &str) -> bool;
}

/// Never stops early; generation runs until `max_new_tokens` or end of sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverStop;

impl StoppingCriteria for NeverStop {
    fn should_stop(&self, _text: &str) -> bool {
        false
    }
}

impl<F> StoppingCriteria for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn should_stop(&self, text: &str) -> bool {
        self(text)
    }
}

/// Identity of the loaded model, surfaced to API clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    /// Model identifier, e.g. `google/gemma-3-270m-it`.
    pub model: String,
    /// Device the model runs on.
    pub device: String,
    /// Parameter dtype.
    pub dtype: String,
}

/// The core engine trait.
pub trait ChatEngine: Send + Sync {
    /// Describe the loaded model.
    fn info(&self) -> ModelInfo;

    /// Convert text into token IDs, truncated to at most `max_length` tokens.
    fn tokenize(&self, text: &str, max_length: usize) -> Result<Vec<TokenId>>;

    /// Convert token IDs back into text.
    fn detokenize(&self, tokens: &[TokenId]) -> Result<String>;

    /// Generate a continuation of `prompt`.
    ///
    /// Returns the full sequence: the prompt tokens followed by the new ones.
    /// `stop` is evaluated after every emitted token.
    fn generate(
        &self,
        prompt: &[TokenId],
        params: &SamplingParams,
        stop: &dyn StoppingCriteria,
    ) -> Result<Vec<TokenId>>;
}
