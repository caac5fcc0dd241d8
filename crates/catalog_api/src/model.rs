//! Request/response models shared by the auth and content clients.

use serde::{Deserialize, Serialize};

/// Authenticated user profile as returned by the auth endpoints and persisted under `user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    /// Stable user id.
    pub id: String,
    /// Account email.
    pub email: String,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    /// Account creation timestamp as sent by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// `POST /auth/login` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Plain-text password; never logged.
    pub password: String,
}

impl LoginRequest {
    /// Builds a login request.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// `POST /auth/register` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    /// Account email.
    pub email: String,
    /// Plain-text password; never logged.
    pub password: String,
    /// Optional display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Successful login/register response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    /// Signed-in user.
    pub user: AuthUser,
    /// Bearer credential for subsequent calls.
    pub access_token: String,
}

/// `PUT /auth/profile` body. Only `Some` fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl ProfileUpdate {
    /// Builds an update containing only the fields that differ from `current`.
    ///
    /// Returns `None` when nothing changed so callers can skip the network round trip.
    pub fn diff(current: &AuthUser, name: &str, email: &str, profile_image: &str) -> Option<Self> {
        let update = Self {
            email: (email != current.email).then(|| email.to_string()),
            name: (name != current.name.as_deref().unwrap_or_default())
                .then(|| name.to_string()),
            profile_image: (profile_image != current.profile_image.as_deref().unwrap_or_default())
                .then(|| profile_image.to_string()),
        };
        (!update.is_empty()).then_some(update)
    }

    /// Returns whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.profile_image.is_none()
    }
}

/// `PUT /auth/password` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    /// Current password, checked by the server.
    pub current_password: String,
    /// Replacement password.
    pub new_password: String,
}

/// Catalog entry returned by the content endpoints. `id` is the content-id key space used by
/// watch history and my list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Content id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Synopsis.
    #[serde(default)]
    pub description: Option<String>,
    /// Poster/thumbnail URL.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Playable video URL; absent items play through the progress simulator.
    #[serde(default)]
    pub video_url: Option<String>,
    /// Release year.
    #[serde(default)]
    pub year: Option<u16>,
    /// Genre tags.
    #[serde(default)]
    pub genre: Vec<String>,
    /// Rating out of 10.
    #[serde(default)]
    pub rating: Option<f32>,
    /// Runtime in minutes.
    #[serde(default)]
    pub duration: Option<u32>,
    /// Cast names.
    #[serde(default)]
    pub cast: Vec<String>,
    /// IMDb id.
    #[serde(default)]
    pub imdb_id: Option<String>,
    /// Content kind (`movie`, `series`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Server creation timestamp.
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn user() -> AuthUser {
        AuthUser {
            id: "u1".to_string(),
            email: "a@b.com".to_string(),
            name: Some("Ada".to_string()),
            profile_image: None,
            created_at: None,
        }
    }

    #[test]
    fn profile_diff_only_carries_changed_fields() {
        let update = ProfileUpdate::diff(&user(), "Ada", "new@b.com", "").expect("changes");
        assert_eq!(update.email.as_deref(), Some("new@b.com"));
        assert_eq!(update.name, None);
        assert_eq!(update.profile_image, None);
    }

    #[test]
    fn unset_fields_match_blank_form_inputs() {
        let mut current = user();
        current.name = None;
        assert_eq!(ProfileUpdate::diff(&current, "", "a@b.com", ""), None);

        let update = ProfileUpdate::diff(&current, "Ada", "a@b.com", "").expect("name set");
        assert_eq!(update.name.as_deref(), Some("Ada"));
        assert_eq!(update.profile_image, None);
    }

    #[test]
    fn profile_diff_without_changes_is_none() {
        let mut current = user();
        current.profile_image = Some("https://cdn/a.png".to_string());
        assert_eq!(
            ProfileUpdate::diff(&current, "Ada", "a@b.com", "https://cdn/a.png"),
            None
        );
    }

    #[test]
    fn user_serializes_with_camel_case_and_skips_missing_fields() {
        let mut current = user();
        current.profile_image = Some("https://cdn/a.png".to_string());
        let json = serde_json::to_value(&current).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "id": "u1",
                "email": "a@b.com",
                "name": "Ada",
                "profileImage": "https://cdn/a.png"
            })
        );
    }

    #[test]
    fn content_item_reads_type_field() {
        let item: ContentItem = serde_json::from_value(serde_json::json!({
            "id": "c1",
            "title": "Heat",
            "genre": ["Crime"],
            "cast": [],
            "type": "movie",
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .expect("deserialize");
        assert_eq!(item.kind, "movie");
        assert_eq!(item.video_url, None);
    }
}
