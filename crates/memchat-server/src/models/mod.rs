//! Request/response types for the chat API.

pub mod chat;
pub mod chats;
pub mod presets;

pub use chat::{ChatRequest, ChatResponse, GenerationParams, ModelMeta};
pub use chats::{AllChatsResponse, UserChatsResponse};
pub use presets::PresetsResponse;
