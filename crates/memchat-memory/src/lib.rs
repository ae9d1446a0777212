//! # memchat-memory
//!
//! Conversation memory for memchat: the per-(user, session) turn store, the
//! bounded-history prompt builder, the stop predicate handed to the engine, and
//! the extractor that trims raw model output back to the assistant's reply.
//!
//! ## Prompt format
//!
//! ```text
//! <system preamble>
//! User: <turn 1 user>
//! Assistant: <turn 1 assistant>
//! ...
//! User: <new message>
//! Assistant:
//! ```
//!
//! The trailing `Assistant:` is both the generation cue and the anchor the
//! extractor searches for. Nothing is escaped, so a message containing either
//! marker flows through verbatim.

pub mod extract;
pub mod history;
pub mod prompt;
pub mod stop;
pub mod store;

pub use extract::ReplyExtractor;
pub use history::{SessionHistory, Turn};
pub use prompt::{PromptBuilder, MAX_MEMORY_TURNS, SYSTEM_PREAMBLE};
pub use stop::UserTurnStop;
pub use store::{SessionGuard, SessionStore, StoreStats};

/// Marker opening an assistant line.
pub const ASSISTANT_MARKER: &str = "Assistant:";

/// Marker opening a user line.
pub const USER_MARKER: &str = "User:";
