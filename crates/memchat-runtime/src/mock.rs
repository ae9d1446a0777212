//! Deterministic mock engine.
//!
//! Stands in for a real model so the service can run end to end without
//! weights. Replies come from a script queue when one is loaded, otherwise
//! the engine echoes the last user line of the prompt. Tokens are bytes
//! ([`ByteTokenizer`]); the stop predicate is checked after each
//! whitespace-delimited batch of tokens.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use memchat_engine::{ChatEngine, ModelInfo, Result, SamplingParams, StoppingCriteria, TokenId};

use crate::device::{DType, Device};
use crate::tokenizer::ByteTokenizer;

/// Model name reported when none is configured.
pub const MOCK_MODEL_NAME: &str = "memchat-mock";

pub struct MockEngine {
    tokenizer: ByteTokenizer,
    model: String,
    device: Device,
    dtype: DType,
    /// Scripted continuations, consumed front to back.
    script: Mutex<VecDeque<String>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            tokenizer: ByteTokenizer::new(),
            model: MOCK_MODEL_NAME.to_string(),
            device: Device::default(),
            dtype: DType::default(),
            script: Mutex::new(VecDeque::new()),
        }
    }

    /// Report a different model identity in [`ChatEngine::info`].
    pub fn with_model(mut self, model: impl Into<String>, device: Device, dtype: DType) -> Self {
        self.model = model.into();
        self.device = device;
        self.dtype = dtype;
        self
    }

    /// Queue raw continuations to be generated verbatim, in order.
    pub fn with_script<I, S>(self, continuations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for c in continuations {
            self.push_continuation(c);
        }
        self
    }

    /// Queue one more raw continuation.
    pub fn push_continuation(&self, continuation: impl Into<String>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(continuation.into());
    }

    fn next_continuation(&self, prompt: &str) -> String {
        let scripted = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        scripted.unwrap_or_else(|| Self::echo(prompt))
    }

    /// Default continuation: repeat the last user line back.
    fn echo(prompt: &str) -> String {
        let last_user = prompt
            .lines()
            .rev()
            .find_map(|line| line.strip_prefix("User:"))
            .map(str::trim)
            .unwrap_or_default();
        format!(" You said: {last_user}")
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatEngine for MockEngine {
    fn info(&self) -> ModelInfo {
        ModelInfo {
            model: self.model.clone(),
            device: self.device.to_string(),
            dtype: self.dtype.to_string(),
        }
    }

    fn tokenize(&self, text: &str, max_length: usize) -> Result<Vec<TokenId>> {
        Ok(self.tokenizer.encode(text, max_length))
    }

    fn detokenize(&self, tokens: &[TokenId]) -> Result<String> {
        self.tokenizer.decode(tokens)
    }

    fn generate(
        &self,
        prompt: &[TokenId],
        params: &SamplingParams,
        stop: &dyn StoppingCriteria,
    ) -> Result<Vec<TokenId>> {
        let prompt_text = self.tokenizer.decode(prompt)?;
        let continuation = self.next_continuation(&prompt_text);

        let mut sequence = prompt.to_vec();
        let mut generated = 0usize;
        let mut stopped = false;

        'batches: for batch in continuation.split_inclusive(char::is_whitespace) {
            for &byte in batch.as_bytes() {
                if generated == params.max_new_tokens {
                    break 'batches;
                }
                sequence.push(TokenId::from(byte));
                generated += 1;
            }
            if stop.should_stop(&self.tokenizer.decode(&sequence)?) {
                stopped = true;
                break;
            }
        }

        tracing::debug!(
            prompt_tokens = prompt.len(),
            generated,
            stopped,
            temperature = params.temperature,
            top_p = params.top_p,
            "mock generation finished"
        );
        Ok(sequence)
    }
}
