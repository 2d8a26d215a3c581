use serde_json::json;
use std::sync::Arc;

use crate::domain::reel::{NewReel, Reel};
use crate::error::ApiError;
use crate::infra::http::Transport;

#[derive(Clone)]
pub struct ReelService {
    api: Arc<dyn Transport>,
}

impl ReelService {
    pub fn new(api: Arc<dyn Transport>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Reel>, ApiError> {
        let body = self.api.get("/reels").await?;
        Ok(serde_json::from_value(body)?)
    }

    pub async fn create(&self, user_id: &str, input: &NewReel) -> Result<Reel, ApiError> {
        let mut body = serde_json::to_value(input)?;
        body["userId"] = json!(user_id);
        let response = self.api.post("/reels", body).await?;
        Ok(serde_json::from_value(response)?)
    }
}
