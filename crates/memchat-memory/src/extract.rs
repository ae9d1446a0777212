//! Reply extraction from raw model output.

use crate::{ASSISTANT_MARKER, USER_MARKER};

/// Trims decoded model output down to the assistant's reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplyExtractor;

impl ReplyExtractor {
    /// Everything after the first `Assistant:` marker, whitespace-trimmed.
    ///
    /// The match is literal and case-sensitive and the captured text may span
    /// lines. Without a marker the input is returned unchanged.
    pub fn extract(raw: &str) -> String {
        match raw.find(ASSISTANT_MARKER) {
            Some(pos) => raw[pos + ASSISTANT_MARKER.len()..].trim().to_string(),
            None => raw.to_string(),
        }
    }

    /// Extract the reply from `raw` = `prompt` followed by generated text.
    ///
    /// Anchors at the prompt's closing `Assistant:` cue so that assistant lines
    /// carried in history are skipped. Falls back to [`Self::extract`] when
    /// `raw` does not start with `prompt` (e.g. the tokenizer did not
    /// round-trip it) or the prompt lacks the closing cue.
    pub fn extract_after_prompt(prompt: &str, raw: &str) -> String {
        if raw.starts_with(prompt) && prompt.ends_with(ASSISTANT_MARKER) {
            let cue = prompt.len() - ASSISTANT_MARKER.len();
            return Self::extract(&raw[cue..]);
        }
        Self::extract(raw)
    }

    /// Remove one trailing `User:` left behind by the stop predicate.
    pub fn strip_stop_marker(reply: &str) -> String {
        match reply.strip_suffix(USER_MARKER) {
            Some(rest) => rest.trim().to_string(),
            None => reply.to_string(),
        }
    }
}
