use futures::future::try_join;

use crate::app::posts::PostService;
use crate::app::stories::StoryService;
use crate::domain::post::Post;
use crate::domain::story::{group_by_user, StoryGroup};
use crate::error::ApiError;

/// What the home screen renders after mount: posts newest-first, stories
/// grouped by owner.
#[derive(Debug)]
pub struct FeedSnapshot {
    pub posts: Vec<Post>,
    pub stories: Vec<StoryGroup>,
}

#[derive(Clone)]
pub struct FeedService {
    posts: PostService,
    stories: StoryService,
}

impl FeedService {
    pub fn new(posts: PostService, stories: StoryService) -> Self {
        Self { posts, stories }
    }

    /// Mount-time load. Posts and stories are fetched concurrently; either
    /// failure fails the load.
    pub async fn load(&self) -> Result<FeedSnapshot, ApiError> {
        let (posts, stories) = try_join(self.posts.list(), self.stories.list()).await?;
        tracing::debug!(posts = posts.len(), stories = stories.len(), "feed loaded");
        Ok(FeedSnapshot {
            posts: newest_first(posts),
            stories: group_by_user(stories),
        })
    }

    /// Full re-fetch after a mutation; this is the point where any optimistic
    /// overrides become stale and should be cleared by the caller.
    pub async fn refresh_posts(&self) -> Result<Vec<Post>, ApiError> {
        Ok(newest_first(self.posts.list().await?))
    }
}

/// The server returns oldest-first; the feed shows the reverse.
fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.reverse();
    posts
}
