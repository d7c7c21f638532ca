use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// The slice of a post this subsystem needs: enough to check that a comment
/// target exists and to hang context onto per-user listings. The full post
/// model (categories, tags, SEO fields) lives with the posts service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub author_id: String,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PostStatus {
    Draft,
    Published,
}

impl Default for PostStatus {
    fn default() -> Self {
        Self::Draft
    }
}
