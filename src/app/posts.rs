use serde_json::json;
use std::sync::Arc;

use crate::domain::post::{Comment, NewPost, Post};
use crate::error::ApiError;
use crate::infra::http::Transport;

/// Post CRUD and interactions. Every operation is exactly one round trip;
/// callers observe new state by re-fetching the collection, except for the
/// optimistic like path which shadows it locally.
#[derive(Clone)]
pub struct PostService {
    api: Arc<dyn Transport>,
}

impl PostService {
    pub fn new(api: Arc<dyn Transport>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Post>, ApiError> {
        let body = self.api.get("/posts").await?;
        Ok(serde_json::from_value(body)?)
    }

    pub async fn create(&self, user_id: &str, input: &NewPost) -> Result<Post, ApiError> {
        let mut body = serde_json::to_value(input)?;
        body["userId"] = json!(user_id);
        let response = self.api.post("/posts", body).await?;
        Ok(serde_json::from_value(response)?)
    }

    /// Only the author may delete; the server enforces it via the acting user.
    pub async fn delete(&self, post_id: &str, acting_user_id: &str) -> Result<(), ApiError> {
        self.api
            .delete(&format!("/posts/{post_id}?userId={acting_user_id}"))
            .await?;
        Ok(())
    }

    pub async fn like(&self, post_id: &str, user_id: &str) -> Result<(), ApiError> {
        self.api
            .post(&format!("/posts/{post_id}/like"), json!({ "userId": user_id }))
            .await?;
        Ok(())
    }

    /// Unliking a post the user never liked is a remote no-op; the client
    /// does not special-case it.
    pub async fn unlike(&self, post_id: &str, user_id: &str) -> Result<(), ApiError> {
        self.api
            .post(
                &format!("/posts/{post_id}/unlike"),
                json!({ "userId": user_id }),
            )
            .await?;
        Ok(())
    }

    pub async fn add_comment(
        &self,
        post_id: &str,
        user_id: &str,
        text: &str,
    ) -> Result<Comment, ApiError> {
        let response = self
            .api
            .post(
                &format!("/posts/{post_id}/comments"),
                json!({ "userId": user_id, "text": text }),
            )
            .await?;
        Ok(serde_json::from_value(response)?)
    }

    pub async fn share(&self, post_id: &str) -> Result<(), ApiError> {
        self.api
            .post_empty(&format!("/posts/{post_id}/share"))
            .await?;
        Ok(())
    }

    pub async fn comments(&self, post_id: &str) -> Result<Vec<Comment>, ApiError> {
        let body = self.api.get(&format!("/posts/{post_id}/comments")).await?;
        Ok(serde_json::from_value(body)?)
    }
}
