//! Bounded-history prompt builder.

use crate::history::SessionHistory;
use crate::{ASSISTANT_MARKER, USER_MARKER};

/// Maximum number of turns carried into a prompt.
pub const MAX_MEMORY_TURNS: usize = 8;

/// Fixed preamble opening every prompt.
pub const SYSTEM_PREAMBLE: &str =
    "You are a helpful and concise AI assistant. Answer the user's latest message clearly and briefly.";

/// Renders a new message plus session history into a single prompt string.
///
/// Building a prompt is also how a session forgets: [`PromptBuilder::build`]
/// evicts the oldest turns from the history it is given, in place.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    preamble: String,
    max_memory_turns: usize,
}

impl PromptBuilder {
    /// Create a builder with the default preamble and memory window.
    pub fn new() -> Self {
        Self {
            preamble: SYSTEM_PREAMBLE.to_string(),
            max_memory_turns: MAX_MEMORY_TURNS,
        }
    }

    /// Override the memory window.
    pub fn with_max_memory_turns(mut self, n: usize) -> Self {
        self.max_memory_turns = n;
        self
    }

    /// Override the system preamble.
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = preamble.into();
        self
    }

    pub fn max_memory_turns(&self) -> usize {
        self.max_memory_turns
    }

    /// Build the prompt for `message`.
    ///
    /// Side effect: `history` is truncated to the memory window (oldest turns
    /// dropped first) before rendering. The result ends with a bare
    /// `Assistant:` cue and is whitespace-trimmed.
    pub fn build(&self, message: &str, history: &mut SessionHistory) -> String {
        let evicted = history.evict_to(self.max_memory_turns);
        if !evicted.is_empty() {
            tracing::debug!(
                evicted = evicted.len(),
                retained = history.len(),
                "evicted oldest turns from session memory"
            );
        }

        let mut prompt = String::with_capacity(self.preamble.len() + message.len() + 64);
        prompt.push_str(&self.preamble);
        prompt.push('\n');

        for turn in history.iter() {
            prompt.push_str(&format!("{USER_MARKER} {}\n", turn.user));
            prompt.push_str(&format!("{ASSISTANT_MARKER} {}\n", turn.assistant));
        }

        prompt.push_str(&format!("{USER_MARKER} {message}\n{ASSISTANT_MARKER}"));
        prompt.trim().to_string()
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::Turn;

    #[test]
    fn empty_history_renders_preamble_and_message() {
        let mut history = SessionHistory::new();
        let prompt = PromptBuilder::new().build("hi there", &mut history);
        assert_eq!(
            prompt,
            format!("{SYSTEM_PREAMBLE}\nUser: hi there\nAssistant:")
        );
    }

    #[test]
    fn turns_render_in_order() {
        let mut history: SessionHistory =
            vec![Turn::new("first", "one"), Turn::new("second", "two")].into();
        let prompt = PromptBuilder::new().build("third", &mut history);
        assert!(prompt.ends_with(
            "User: first\nAssistant: one\nUser: second\nAssistant: two\nUser: third\nAssistant:"
        ));
    }

    #[test]
    fn custom_window_evicts_in_place() {
        let mut history: SessionHistory = (0..4)
            .map(|i| Turn::new(format!("q{i}"), format!("a{i}")))
            .collect::<Vec<_>>()
            .into();
        let prompt = PromptBuilder::new()
            .with_max_memory_turns(2)
            .build("next", &mut history);
        assert_eq!(history.len(), 2);
        assert!(!prompt.contains("q1"));
        assert!(prompt.contains("User: q2"));
    }

    #[test]
    fn output_is_trimmed() {
        let mut history = SessionHistory::new();
        let prompt = PromptBuilder::new()
            .with_preamble("\n\n  Be brief.")
            .build("hey  ", &mut history);
        assert!(prompt.starts_with("Be brief."));
        assert!(prompt.ends_with("Assistant:"));
    }

    #[test]
    fn markers_in_message_pass_through() {
        let mut history = SessionHistory::new();
        let prompt = PromptBuilder::new().build("User: Assistant: hi", &mut history);
        assert!(prompt.contains("User: User: Assistant: hi\nAssistant:"));
    }
}
