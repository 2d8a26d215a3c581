use serde_json::json;
use std::sync::Arc;

use crate::domain::story::{NewStory, Story};
use crate::error::ApiError;
use crate::infra::http::Transport;

#[derive(Clone)]
pub struct StoryService {
    api: Arc<dyn Transport>,
}

impl StoryService {
    pub fn new(api: Arc<dyn Transport>) -> Self {
        Self { api }
    }

    /// The whole story feed, every user mixed together. Callers group it
    /// with `domain::story::group_by_user` for display.
    pub async fn list(&self) -> Result<Vec<Story>, ApiError> {
        let body = self.api.get("/stories").await?;
        Ok(serde_json::from_value(body)?)
    }

    pub async fn for_user(&self, user_id: &str) -> Result<Vec<Story>, ApiError> {
        let body = self.api.get(&format!("/stories/user/{user_id}")).await?;
        Ok(serde_json::from_value(body)?)
    }

    pub async fn create(&self, user_id: &str, input: &NewStory) -> Result<Story, ApiError> {
        let mut body = serde_json::to_value(input)?;
        body["userId"] = json!(user_id);
        let response = self.api.post("/stories", body).await?;
        Ok(serde_json::from_value(response)?)
    }

    /// Deletion is always explicit; the 24h display window is a product rule
    /// the server applies, not something the client enforces.
    pub async fn delete(&self, story_id: &str) -> Result<(), ApiError> {
        self.api.delete(&format!("/stories/{story_id}")).await?;
        Ok(())
    }
}
