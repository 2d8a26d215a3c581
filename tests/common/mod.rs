#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use ripple::domain::post::Post;
use ripple::error::ApiError;
use ripple::infra::http::{RequestOptions, Transport};

// ---------------------------------------------------------------------------
// MockApi — scripted transport shared by the integration tests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct MockApi {
    routes: Mutex<HashMap<String, Value>>,
    failures: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn key(method: &Method, path: &str) -> String {
        format!("{method} {path}")
    }

    /// Answer `method path` with a canned body.
    pub fn on(&self, method: Method, path: &str, response: Value) {
        self.routes
            .lock()
            .unwrap()
            .insert(Self::key(&method, path), response);
    }

    /// Make `method path` fail with a network error.
    pub fn fail(&self, method: Method, path: &str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(Self::key(&method, path), message.to_string());
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, method: Method, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .count()
    }
}

#[async_trait]
impl Transport for MockApi {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        _options: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: method.clone(),
            path: path.to_string(),
            body,
        });

        let key = Self::key(&method, path);
        if let Some(message) = self.failures.lock().unwrap().get(&key) {
            return Err(ApiError::network(message.clone()));
        }
        self.routes
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| ApiError::network(format!("no route for {key}")))
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn user_json(id: &str, username: &str) -> Value {
    json!({ "id": id, "username": username })
}

pub fn post_json(id: &str, author: &str, liked_by: &[&str]) -> Value {
    json!({
        "id": id,
        "user": user_json(author, author),
        "content": format!("post {id}"),
        "likedBy": liked_by,
        "shareCount": 0
    })
}

pub fn story_json(id: &str, user_id: &str) -> Value {
    json!({
        "id": id,
        "userId": user_id,
        "mediaUrl": format!("https://cdn.example/{id}.jpg")
    })
}

pub fn post_fixture(id: &str, author: &str, liked_by: &[&str]) -> Post {
    serde_json::from_value(post_json(id, author, liked_by)).unwrap()
}
