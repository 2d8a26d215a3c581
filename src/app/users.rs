use std::sync::Arc;

use crate::domain::user::{ProfileUpdate, User};
use crate::error::ApiError;
use crate::infra::http::Transport;

#[derive(Clone)]
pub struct UserService {
    api: Arc<dyn Transport>,
}

impl UserService {
    pub fn new(api: Arc<dyn Transport>) -> Self {
        Self { api }
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, ApiError> {
        let body = self.api.get(&format!("/users/{user_id}")).await?;
        Ok(User::from_json(body)?)
    }

    /// Identity is immutable; everything in `ProfileUpdate` is fair game.
    pub async fn update_profile(
        &self,
        user_id: &str,
        changes: &ProfileUpdate,
    ) -> Result<User, ApiError> {
        let body = serde_json::to_value(changes)?;
        let response = self.api.put(&format!("/users/{user_id}"), body).await?;
        Ok(User::from_json(response)?)
    }
}
