//! Data models: database row entities and API response shapes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// User row as stored. Never serialized directly; `UserPublic` strips the
/// password hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Public fields of a user.
#[derive(Debug, Clone, Serialize)]
pub struct UserPublic {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserPublic,
}

/// Video row joined with its owner's email and freshly computed like and
/// comment counts. `liked_at` is populated only by the liked-videos query.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VideoRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub genre: String,
    pub file_name: String,
    pub thumbnail: Option<String>,
    pub owner_id: Uuid,
    pub owner_email: String,
    pub views: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub liked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Video as returned by the API, with the derived playback URL.
#[derive(Debug, Serialize)]
pub struct VideoResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub genre: String,
    pub url: String,
    pub thumbnail: Option<String>,
    pub owner_id: Uuid,
    pub owner_email: String,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<VideoRecord> for VideoResponse {
    fn from(v: VideoRecord) -> Self {
        Self {
            id: v.id,
            title: v.title,
            description: v.description,
            genre: v.genre,
            url: format!("/uploads/{}", v.file_name),
            thumbnail: v.thumbnail,
            owner_id: v.owner_id,
            owner_email: v.owner_email,
            views: v.views,
            likes: v.like_count,
            comments: v.comment_count,
            liked_at: v.liked_at,
            created_at: v.created_at,
        }
    }
}

/// Comment row with the author's email resolved at write time.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Comment {
    pub id: Uuid,
    pub video_id: Uuid,
    pub user_id: Uuid,
    pub author_email: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
