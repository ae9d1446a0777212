//! Session listing responses.

use std::collections::BTreeMap;

use memchat_memory::SessionHistory;
use serde::Serialize;

/// `GET /get_chats/{user_id}`.
#[derive(Debug, Serialize)]
pub struct UserChatsResponse {
    pub user_id: String,
    pub sessions: BTreeMap<String, SessionHistory>,
}

/// `GET /get_all_chats`.
#[derive(Debug, Serialize)]
pub struct AllChatsResponse {
    pub all_users: BTreeMap<String, BTreeMap<String, SessionHistory>>,
}
