//! HTTP request handlers for API endpoints.

pub mod chat;
pub mod chats;
pub mod health;
pub mod presets;

pub use chat::handle_chat;
pub use chats::{handle_get_all_chats, handle_get_chats};
pub use health::handle_health;
pub use presets::handle_presets;
