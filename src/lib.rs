pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod session;

use std::sync::Arc;

use crate::app::auth::AuthService;
use crate::app::engagement::InteractionController;
use crate::app::feed::FeedService;
use crate::app::messages::MessageService;
use crate::app::posts::PostService;
use crate::app::reels::ReelService;
use crate::app::stories::StoryService;
use crate::app::users::UserService;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::infra::http::{ApiClient, Transport};
use crate::session::Session;

/// Every service a screen dispatches into, wired against one API client.
/// The session itself stays outside: it is constructed explicitly and passed
/// to the flows that need it.
pub struct AppState {
    pub api: Arc<ApiClient>,
    pub auth: AuthService,
    pub posts: PostService,
    pub stories: StoryService,
    pub reels: ReelService,
    pub messages: MessageService,
    pub users: UserService,
    pub feed: FeedService,
}

impl AppState {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let api = Arc::new(ApiClient::new(config)?);
        let transport: Arc<dyn Transport> = api.clone();

        let posts = PostService::new(transport.clone());
        let stories = StoryService::new(transport.clone());
        Ok(Self {
            auth: AuthService::new(transport.clone()),
            feed: FeedService::new(posts.clone(), stories.clone()),
            reels: ReelService::new(transport.clone()),
            messages: MessageService::new(transport.clone()),
            users: UserService::new(transport),
            posts,
            stories,
            api,
        })
    }

    /// Point the transport at whatever token the session holds. Call after
    /// login, restore, and sign-out.
    pub fn adopt_session(&self, session: &Session) {
        match session.token() {
            Some(token) => self.api.set_token(token),
            None => self.api.clear_token(),
        }
    }

    /// A fresh interaction controller for one feed screen.
    pub fn interactions(&self) -> InteractionController {
        InteractionController::new(self.posts.clone())
    }
}
