use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use validator::Validate;

use crate::models::post::Post;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub parent_id: Option<String>,
    pub content: String,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Wire names match the platform's public enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommentStatus {
    Pending,
    Approved,
    Rejected,
}

impl Default for CommentStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl CommentStatus {
    pub fn is_publicly_visible(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

/// A comment with its replies materialized for display. Reply lists nest
/// again one more level, so the deepest populated level is the second;
/// anything deeper stays unexpanded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentThread {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<CommentThread>,
}

/// A comment carrying the post and parent it hangs off of, for per-user
/// listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentWithContext {
    #[serde(flatten)]
    pub comment: Comment,
    pub post: Post,
    pub parent: Option<Comment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1))]
    pub post_id: String,
    pub parent_id: Option<String>,
    #[validate(length(min = 1, max = 1000))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 1000))]
    pub content: Option<String>,
    pub status: Option<CommentStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    pub search_term: Option<String>,
    pub author_id: Option<String>,
    pub post_id: Option<String>,
    pub status: Option<CommentStatus>,
    pub root_only: bool,
    pub take: Option<usize>,
    pub skip: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentPage {
    pub comments: Vec<CommentThread>,
    pub total_count: usize,
    pub has_more: bool,
}
