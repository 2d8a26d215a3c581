use anyhow::{Context, Result};
use std::sync::Arc;

use crate::domain::user::User;
use crate::error::ApiError;
use crate::infra::store::KeyValueStore;

const TOKEN_KEY: &str = "userToken";
const USER_KEY: &str = "user";
const USERNAME_KEY: &str = "username";

/// The one piece of state shared across screens: who is signed in, and with
/// what token. Constructed explicitly and handed to whoever needs it; screens
/// treat an unauthenticated session as a terminal "must sign in" state.
///
/// Transitions: `establish` on login, `restore` on app start, `sign_out` on
/// explicit logout. All persistence goes through the injected store.
pub struct Session {
    store: Arc<dyn KeyValueStore>,
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    /// Fresh, signed-out session.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            token: None,
            user: None,
        }
    }

    /// Rebuild the session from on-device storage. Missing or partial keys
    /// yield a signed-out session rather than an error; a present but
    /// unreadable user blob is an error.
    pub fn restore(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let token = store.get(TOKEN_KEY);
        let user = match store.get(USER_KEY) {
            Some(raw) => {
                let value = serde_json::from_str(&raw).context("stored user is not JSON")?;
                Some(User::from_json(value).context("stored user has unexpected shape")?)
            }
            None => None,
        };

        let (token, user) = match (token, user) {
            (Some(token), Some(user)) => (Some(token), Some(user)),
            _ => (None, None),
        };
        Ok(Self { store, token, user })
    }

    /// Login succeeded: adopt the token and user and persist them.
    pub fn establish(&mut self, token: String, user: User) -> Result<()> {
        self.store.set(TOKEN_KEY, &token)?;
        self.store.set(USER_KEY, &serde_json::to_string(&user)?)?;
        self.store.set(USERNAME_KEY, &user.username)?;
        self.token = Some(token);
        self.user = Some(user);
        Ok(())
    }

    /// Profile edits flow back into the session so every screen sees them.
    pub fn update_user(&mut self, user: User) -> Result<()> {
        self.store.set(USER_KEY, &serde_json::to_string(&user)?)?;
        self.user = Some(user);
        Ok(())
    }

    pub fn sign_out(&mut self) -> Result<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        self.store.remove(USERNAME_KEY)?;
        self.token = None;
        self.user = None;
        tracing::info!("session cleared");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The signed-in user, or a `State` error for screens to short-circuit on.
    pub fn current_user(&self) -> Result<&User, ApiError> {
        self.user
            .as_ref()
            .ok_or_else(|| ApiError::state("no authenticated user"))
    }
}
