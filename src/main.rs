use anyhow::{anyhow, Result};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ripple::config::ClientConfig;
use ripple::infra::store::FileStore;
use ripple::session::Session;
use ripple::AppState;

/// Headless demo: restore or establish a session, then pull the home feed
/// and recent chats and log what came back.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env()?;
    let state = AppState::new(&config)?;

    let store = Arc::new(FileStore::open(&config.session_store_path)?);
    let mut session = Session::restore(store)?;

    if !session.is_authenticated() {
        let username = std::env::var("RIPPLE_USERNAME")
            .map_err(|_| anyhow!("no stored session; set RIPPLE_USERNAME and RIPPLE_PASSWORD"))?;
        let password = std::env::var("RIPPLE_PASSWORD")
            .map_err(|_| anyhow!("no stored session; set RIPPLE_USERNAME and RIPPLE_PASSWORD"))?;

        if !state.auth.test_connection().await {
            return Err(anyhow!("cannot reach {}", config.api_base_url));
        }
        state.auth.login(&mut session, &username, &password).await?;
    }
    state.adopt_session(&session);

    let user = session.current_user()?.clone();
    tracing::info!(user_id = %user.id, username = %user.username, "signed in");

    let feed = state.feed.load().await?;
    tracing::info!(
        posts = feed.posts.len(),
        story_groups = feed.stories.len(),
        "feed loaded"
    );

    let chats = state.messages.recent_chats(&user.id).await?;
    tracing::info!(chats = chats.len(), "recent chats loaded");

    Ok(())
}
