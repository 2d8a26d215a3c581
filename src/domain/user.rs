use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub details: UserDetails,
}

/// Free-form profile detail fields, all optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub works_at1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub works_at2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub studied_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub went_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hometown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_status: Option<String>,
    #[serde(default)]
    pub show_avatar: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// Decode a user object from a response body, normalizing the legacy
    /// `userId` key to the canonical `id` when `id` is absent.
    pub fn from_json(mut value: Value) -> serde_json::Result<Self> {
        if let Some(object) = value.as_object_mut() {
            if !object.contains_key("id") {
                if let Some(user_id) = object.remove("userId") {
                    object.insert("id".to_string(), user_id);
                }
            }
        }
        serde_json::from_value(value)
    }
}

/// Mutable profile fields sent by the edit-profile flow. Absent fields are
/// left untouched server-side.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<UserDetails>,
}
