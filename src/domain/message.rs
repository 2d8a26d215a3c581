use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Per-conversation projection shown on the messenger screen. Read-only;
/// fetched fresh each session, never mutated locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_message_time: Option<OffsetDateTime>,
    #[serde(default)]
    pub unread_count: u64,
    #[serde(default)]
    pub is_online: bool,
}

impl ChatSummary {
    /// Display name preference used by the chat list.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}
