use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::OffsetDateTime;

/// Ephemeral by product convention (24h display window); the client only ever
/// deletes stories explicitly, it never expires them itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    pub media_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStory {
    pub media_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// One user's current story set, in feed order.
#[derive(Debug, Clone)]
pub struct StoryGroup {
    pub user_id: String,
    pub stories: Vec<Story>,
}

/// Group a story feed by owning user. Groups appear in first-seen order and
/// each group preserves the insertion order of its members.
pub fn group_by_user(stories: Vec<Story>) -> Vec<StoryGroup> {
    let mut groups: Vec<StoryGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for story in stories {
        match index.get(story.user_id.as_str()) {
            Some(&at) => groups[at].stories.push(story),
            None => {
                index.insert(story.user_id.clone(), groups.len());
                groups.push(StoryGroup {
                    user_id: story.user_id.clone(),
                    stories: vec![story],
                });
            }
        }
    }
    groups
}
