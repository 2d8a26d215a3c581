//! Feed loading, story grouping, and the remaining post interactions.

mod common;

use common::{post_json, story_json, MockApi};
use reqwest::Method;
use serde_json::json;

use ripple::app::feed::FeedService;
use ripple::app::messages::MessageService;
use ripple::app::posts::PostService;
use ripple::app::reels::ReelService;
use ripple::app::stories::StoryService;
use ripple::app::users::UserService;
use ripple::domain::post::NewPost;
use ripple::domain::user::ProfileUpdate;
use ripple::error::ApiError;

fn feed(api: &std::sync::Arc<MockApi>) -> FeedService {
    FeedService::new(PostService::new(api.clone()), StoryService::new(api.clone()))
}

// ===========================================================================
// Feed load
// ===========================================================================

#[tokio::test]
async fn load_reverses_posts_and_groups_stories() {
    let api = MockApi::new();
    api.on(
        Method::GET,
        "/posts",
        json!([
            post_json("p1", "alice", &[]),
            post_json("p2", "bob", &["u1"]),
        ]),
    );
    api.on(
        Method::GET,
        "/stories",
        json!([
            story_json("s1", "u1"),
            story_json("s2", "u1"),
            story_json("s3", "u2"),
        ]),
    );

    let snapshot = feed(&api).load().await.unwrap();

    // Server order is oldest-first; the feed renders newest-first.
    assert_eq!(snapshot.posts[0].id, "p2");
    assert_eq!(snapshot.posts[1].id, "p1");

    assert_eq!(snapshot.stories.len(), 2);
    assert_eq!(snapshot.stories[0].user_id, "u1");
    assert_eq!(snapshot.stories[0].stories.len(), 2);
    assert_eq!(snapshot.stories[0].stories[0].id, "s1");
    assert_eq!(snapshot.stories[1].user_id, "u2");
}

#[tokio::test]
async fn load_fails_when_either_fetch_fails() {
    let api = MockApi::new();
    api.on(Method::GET, "/posts", json!([]));
    api.fail(Method::GET, "/stories", "connection refused");

    let err = feed(&api).load().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn refresh_returns_newest_first() {
    let api = MockApi::new();
    api.on(
        Method::GET,
        "/posts",
        json!([post_json("p1", "alice", &[]), post_json("p2", "bob", &[])]),
    );

    let posts = feed(&api).refresh_posts().await.unwrap();
    assert_eq!(posts[0].id, "p2");
}

// ===========================================================================
// Posts: create, delete, comment, share
// ===========================================================================

#[tokio::test]
async fn create_post_sends_author_and_content() {
    let api = MockApi::new();
    api.on(Method::POST, "/posts", post_json("p9", "alice", &[]));
    let posts = PostService::new(api.clone());

    let input = NewPost {
        content: "hello".to_string(),
        image_url: Some("https://cdn.example/i.jpg".to_string()),
        video_url: None,
    };
    let created = posts.create("u1", &input).await.unwrap();
    assert_eq!(created.id, "p9");

    let body = api.calls()[0].body.clone().unwrap();
    assert_eq!(body["userId"], "u1");
    assert_eq!(body["content"], "hello");
    assert_eq!(body["imageUrl"], "https://cdn.example/i.jpg");
    assert!(body.get("videoUrl").is_none());
}

#[tokio::test]
async fn delete_post_passes_acting_user() {
    let api = MockApi::new();
    api.on(Method::DELETE, "/posts/p1?userId=u1", json!(null));
    let posts = PostService::new(api.clone());

    posts.delete("p1", "u1").await.unwrap();
    assert_eq!(api.calls_to(Method::DELETE, "/posts/p1?userId=u1"), 1);
}

#[tokio::test]
async fn add_comment_round_trips() {
    let api = MockApi::new();
    api.on(
        Method::POST,
        "/posts/p1/comments",
        json!({
            "id": "c1",
            "postId": "p1",
            "username": "alice",
            "text": "nice",
            "createdAt": "2026-08-01T10:00:00Z"
        }),
    );
    let posts = PostService::new(api.clone());

    let comment = posts.add_comment("p1", "u1", "nice").await.unwrap();
    assert_eq!(comment.id, "c1");
    assert_eq!(comment.text, "nice");

    let body = api.calls()[0].body.clone().unwrap();
    assert_eq!(body["userId"], "u1");
    assert_eq!(body["text"], "nice");
}

#[tokio::test]
async fn share_is_a_bare_post() {
    let api = MockApi::new();
    api.on(Method::POST, "/posts/p1/share", json!(null));
    let posts = PostService::new(api.clone());

    posts.share("p1").await.unwrap();
    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].body.is_none());
}

#[tokio::test]
async fn comments_fetch_decodes_sequence() {
    let api = MockApi::new();
    api.on(
        Method::GET,
        "/posts/p1/comments",
        json!([
            { "id": "c1", "username": "alice", "text": "first" },
            { "id": "c2", "username": "bob", "text": "second" }
        ]),
    );
    let posts = PostService::new(api.clone());

    let comments = posts.comments("p1").await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].id, "c1");
    assert_eq!(comments[1].username, "bob");
}

// ===========================================================================
// Stories, messages, users
// ===========================================================================

#[tokio::test]
async fn story_create_and_delete_hit_expected_routes() {
    let api = MockApi::new();
    api.on(Method::POST, "/stories", story_json("s1", "u1"));
    api.on(Method::DELETE, "/stories/s1", json!(null));
    let stories = StoryService::new(api.clone());

    let input = ripple::domain::story::NewStory {
        media_url: "https://cdn.example/s1.jpg".to_string(),
        caption: Some("sunset".to_string()),
    };
    let story = stories.create("u1", &input).await.unwrap();
    assert_eq!(story.id, "s1");

    let body = api.calls()[0].body.clone().unwrap();
    assert_eq!(body["userId"], "u1");
    assert_eq!(body["caption"], "sunset");

    stories.delete("s1").await.unwrap();
    assert_eq!(api.calls_to(Method::DELETE, "/stories/s1"), 1);
}

#[tokio::test]
async fn recent_chats_decode_projection() {
    let api = MockApi::new();
    api.on(
        Method::GET,
        "/messages/recent/u1",
        json!([{
            "id": "u2",
            "username": "bob",
            "fullName": "Bob B",
            "lastMessage": "see you",
            "unreadCount": 3,
            "isOnline": true
        }]),
    );
    let messages = MessageService::new(api.clone());

    let chats = messages.recent_chats("u1").await.unwrap();
    assert_eq!(chats.len(), 1);
    assert_eq!(chats[0].display_name(), "Bob B");
    assert_eq!(chats[0].unread_count, 3);
    assert!(chats[0].is_online);
}

#[tokio::test]
async fn my_stories_come_from_the_user_route() {
    let api = MockApi::new();
    api.on(
        Method::GET,
        "/stories/user/u1",
        json!([story_json("s1", "u1"), story_json("s2", "u1")]),
    );
    let stories = StoryService::new(api.clone());

    let mine = stories.for_user("u1").await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|story| story.user_id == "u1"));
}

#[tokio::test]
async fn reels_list_and_create() {
    let api = MockApi::new();
    api.on(
        Method::GET,
        "/reels",
        json!([{ "id": "r1", "userId": "u2", "mediaUrl": "https://cdn.example/r1.mp4" }]),
    );
    api.on(
        Method::POST,
        "/reels",
        json!({ "id": "r2", "userId": "u1", "mediaUrl": "https://cdn.example/r2.mp4" }),
    );
    let reels = ReelService::new(api.clone());

    let listed = reels.list().await.unwrap();
    assert_eq!(listed[0].id, "r1");

    let input = ripple::domain::reel::NewReel {
        media_url: "https://cdn.example/r2.mp4".to_string(),
        caption: None,
    };
    let created = reels.create("u1", &input).await.unwrap();
    assert_eq!(created.user_id, "u1");
}

#[tokio::test]
async fn get_user_normalizes_legacy_id() {
    let api = MockApi::new();
    api.on(
        Method::GET,
        "/users/u1",
        json!({ "userId": "u1", "username": "alice" }),
    );
    let users = UserService::new(api.clone());

    let user = users.get_user("u1").await.unwrap();
    assert_eq!(user.id, "u1");
}

#[tokio::test]
async fn profile_update_normalizes_returned_user() {
    let api = MockApi::new();
    api.on(
        Method::PUT,
        "/users/u1",
        json!({ "userId": "u1", "username": "alice", "bio": "updated" }),
    );
    let users = UserService::new(api.clone());

    let changes = ProfileUpdate {
        bio: Some("updated".to_string()),
        ..Default::default()
    };
    let user = users.update_profile("u1", &changes).await.unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.bio.as_deref(), Some("updated"));

    // Absent fields stay off the wire.
    let body = api.calls()[0].body.clone().unwrap();
    assert!(body.get("fullName").is_none());
    assert_eq!(body["bio"], "updated");
}
