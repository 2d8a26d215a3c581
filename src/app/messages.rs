use std::sync::Arc;

use crate::domain::message::ChatSummary;
use crate::error::ApiError;
use crate::infra::http::Transport;

#[derive(Clone)]
pub struct MessageService {
    api: Arc<dyn Transport>,
}

impl MessageService {
    pub fn new(api: Arc<dyn Transport>) -> Self {
        Self { api }
    }

    /// Read-only projection for the messenger screen, fetched per session.
    pub async fn recent_chats(&self, user_id: &str) -> Result<Vec<ChatSummary>, ApiError> {
        let body = self.api.get(&format!("/messages/recent/{user_id}")).await?;
        Ok(serde_json::from_value(body)?)
    }
}
