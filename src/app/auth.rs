use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::user::User;
use crate::error::{ApiError, FieldError};
use crate::infra::http::{RequestOptions, Transport};
use crate::session::Session;

/// Login waits longer than the connectivity probe; both override whatever
/// default the transport carries.
const LOGIN_TIMEOUT: Duration = Duration::from_secs(10);
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    user: Value,
}

#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn Transport>,
}

impl AuthService {
    pub fn new(api: Arc<dyn Transport>) -> Self {
        Self { api }
    }

    /// Client-side form checks. A failure here blocks submission entirely;
    /// no request is issued.
    pub fn validate_credentials(username: &str, password: &str) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        if username.trim().is_empty() {
            errors.push(FieldError::new("username", "Username is required"));
        }
        if password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        } else if password.chars().count() < 6 {
            errors.push(FieldError::new(
                "password",
                "Password must be at least 6 characters",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(errors))
        }
    }

    /// Validate, authenticate, and establish the session. The response user
    /// may carry a legacy `userId` key; it is normalized before the session
    /// adopts it.
    pub async fn login(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<User, ApiError> {
        Self::validate_credentials(username, password)?;

        let body = json!({ "username": username.trim(), "password": password });
        let response = self
            .api
            .request(
                Method::POST,
                "/auth/login",
                Some(body),
                RequestOptions::timeout(LOGIN_TIMEOUT),
            )
            .await?;

        let LoginResponse { token, user } = serde_json::from_value(response)?;
        let user = User::from_json(user)?;
        session
            .establish(token, user.clone())
            .map_err(|err| ApiError::state(format!("failed to persist session: {err}")))?;
        tracing::info!(user_id = %user.id, "session established");
        Ok(user)
    }

    /// Cheap reachability probe used before showing the login form errors.
    pub async fn test_connection(&self) -> bool {
        self.api
            .request(
                Method::GET,
                "/auth/test",
                None,
                RequestOptions::timeout(PROBE_TIMEOUT),
            )
            .await
            .is_ok()
    }

    /// Sign-out is purely local: drop the session and its persisted keys.
    pub fn sign_out(&self, session: &mut Session) -> Result<(), ApiError> {
        session
            .sign_out()
            .map_err(|err| ApiError::state(format!("failed to clear session: {err}")))
    }
}
