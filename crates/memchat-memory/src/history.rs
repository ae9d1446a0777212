//! Turns and the ordered per-session history.

use serde::{Deserialize, Serialize};

/// One completed exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub user: String,
    pub assistant: String,
}

impl Turn {
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
        }
    }
}

/// Turns of one session, oldest first.
///
/// Serializes as a plain JSON array of turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionHistory {
    turns: Vec<Turn>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// All stored turns (oldest → newest).
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    /// Append a turn at the newest end.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Drop the oldest turns until at most `max` remain.
    ///
    /// Returns the evicted turns in their original order.
    pub fn evict_to(&mut self, max: usize) -> Vec<Turn> {
        let excess = self.turns.len().saturating_sub(max);
        self.turns.drain(..excess).collect()
    }
}

impl From<Vec<Turn>> for SessionHistory {
    fn from(turns: Vec<Turn>) -> Self {
        Self { turns }
    }
}

impl<'a> IntoIterator for &'a SessionHistory {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(n: usize) -> SessionHistory {
        (0..n)
            .map(|i| Turn::new(format!("q{i}"), format!("a{i}")))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn evict_to_drops_oldest_first() {
        let mut history = history_of(5);
        let evicted = history.evict_to(3);
        assert_eq!(evicted, vec![Turn::new("q0", "a0"), Turn::new("q1", "a1")]);
        assert_eq!(history.turns()[0], Turn::new("q2", "a2"));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn evict_to_is_noop_within_bound() {
        let mut history = history_of(2);
        assert!(history.evict_to(8).is_empty());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn serializes_as_array_of_turns() {
        let history = history_of(1);
        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json, serde_json::json!([{"user": "q0", "assistant": "a0"}]));
    }
}
