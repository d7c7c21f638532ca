use crate::error::Result;
use crate::models::{Comment, CommentFilter, Post, User};
use chrono::Utc;
use dashmap::DashMap;

/// In-process content store: id-keyed tables for the entities the comment
/// subsystem touches. Rows are independently owned; the parent/child comment
/// edge is just a nullable id column, reconstructed into a tree on read.
///
/// Each operation is a single round trip and atomic per row (DashMap entry
/// locking), so concurrent writers resolve last-write-wins at the row level.
#[derive(Debug, Default)]
pub struct ContentStore {
    posts: DashMap<String, Post>,
    users: DashMap<String, User>,
    comments: DashMap<String, Comment>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Posts

    pub async fn create_post(&self, mut post: Post) -> Result<Post> {
        let now = Utc::now();
        post.created_at = now;
        post.updated_at = now;
        self.posts.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    pub async fn get_post(&self, id: &str) -> Result<Option<Post>> {
        Ok(self.posts.get(id).map(|entry| entry.value().clone()))
    }

    // Users

    pub async fn create_user(&self, mut user: User) -> Result<User> {
        let now = Utc::now();
        user.created_at = now;
        user.updated_at = now;
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.get(id).map(|entry| entry.value().clone()))
    }

    // Comments

    pub async fn create_comment(&self, mut comment: Comment) -> Result<Comment> {
        let now = Utc::now();
        comment.created_at = now;
        comment.updated_at = now;
        self.comments.insert(comment.id.clone(), comment.clone());
        Ok(comment)
    }

    pub async fn get_comment(&self, id: &str) -> Result<Option<Comment>> {
        Ok(self.comments.get(id).map(|entry| entry.value().clone()))
    }

    /// Applies a partial update under the row's entry lock and stamps
    /// `updated_at`. Returns the updated row, or `None` if the id is absent.
    pub async fn update_comment<F>(&self, id: &str, apply: F) -> Result<Option<Comment>>
    where
        F: FnOnce(&mut Comment),
    {
        match self.comments.get_mut(id) {
            Some(mut entry) => {
                let comment = entry.value_mut();
                apply(comment);
                comment.updated_at = Utc::now();
                Ok(Some(comment.clone()))
            }
            None => Ok(None),
        }
    }

    /// Removes the row entirely. Returns `false` if the id was absent.
    pub async fn delete_comment(&self, id: &str) -> Result<bool> {
        Ok(self.comments.remove(id).is_some())
    }

    pub async fn comments_by_post(&self, post_id: &str) -> Result<Vec<Comment>> {
        Ok(self
            .comments
            .iter()
            .filter(|entry| entry.value().post_id == post_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    pub async fn comments_by_author(&self, author_id: &str) -> Result<Vec<Comment>> {
        Ok(self
            .comments
            .iter()
            .filter(|entry| entry.value().author_id == author_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    pub async fn replies_of(&self, parent_id: &str) -> Result<Vec<Comment>> {
        Ok(self
            .comments
            .iter()
            .filter(|entry| entry.value().parent_id.as_deref() == Some(parent_id))
            .map(|entry| entry.value().clone())
            .collect())
    }

    /// Full filtered scan; ordering and pagination stay with the caller.
    pub async fn filter_comments(&self, filter: &CommentFilter) -> Result<Vec<Comment>> {
        let search_term = filter
            .search_term
            .as_ref()
            .map(|term| term.to_lowercase());

        Ok(self
            .comments
            .iter()
            .filter(|entry| {
                let comment = entry.value();
                if let Some(term) = &search_term {
                    if !comment.content.to_lowercase().contains(term.as_str()) {
                        return false;
                    }
                }
                if let Some(author_id) = &filter.author_id {
                    if &comment.author_id != author_id {
                        return false;
                    }
                }
                if let Some(post_id) = &filter.post_id {
                    if &comment.post_id != post_id {
                        return false;
                    }
                }
                if let Some(status) = filter.status {
                    if comment.status != status {
                        return false;
                    }
                }
                if filter.root_only && comment.parent_id.is_some() {
                    return false;
                }
                true
            })
            .map(|entry| entry.value().clone())
            .collect())
    }
}
