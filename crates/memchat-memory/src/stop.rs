//! Stop predicate: halt once the model starts a new user turn.

use memchat_engine::StoppingCriteria;

use crate::USER_MARKER;

/// Characters of trailing text inspected for the user marker.
pub const STOP_WINDOW_CHARS: usize = 20;

/// Signals the engine to stop when `User:` shows up near the end of the text.
///
/// Operates on decoded characters rather than tokens, so a marker straddling
/// the window edge can be missed and a legitimate `User:` in a reply will
/// trigger it.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserTurnStop;

impl UserTurnStop {
    /// The last [`STOP_WINDOW_CHARS`] characters of `text`.
    fn tail(text: &str) -> &str {
        match text.char_indices().rev().nth(STOP_WINDOW_CHARS - 1) {
            Some((idx, _)) => &text[idx..],
            None => text,
        }
    }
}

impl StoppingCriteria for UserTurnStop {
    fn should_stop(&self, text: &str) -> bool {
        Self::tail(text).contains(USER_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_on_trailing_marker() {
        assert!(UserTurnStop.should_stop("...some text User:"));
    }

    #[test]
    fn ignores_broken_marker() {
        assert!(!UserTurnStop.should_stop("...some textUsermore:"));
    }

    #[test]
    fn marker_outside_window_is_ignored() {
        let text = format!("User:{}", "x".repeat(STOP_WINDOW_CHARS));
        assert!(!UserTurnStop.should_stop(&text));
    }

    #[test]
    fn marker_exactly_at_window_start() {
        let text = format!("abcUser:{}", "x".repeat(STOP_WINDOW_CHARS - 5));
        assert!(UserTurnStop.should_stop(&text));
    }

    #[test]
    fn window_counts_characters_not_bytes() {
        // 15 multi-byte chars keep the marker inside a 20-char window.
        let text = format!("User:{}", "é".repeat(15));
        assert!(UserTurnStop.should_stop(&text));
    }

    #[test]
    fn short_text_is_inspected_whole() {
        assert!(UserTurnStop.should_stop("User:"));
        assert!(!UserTurnStop.should_stop(""));
    }
}
