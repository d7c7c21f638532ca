use crate::{
    config::Config,
    error::{AppError, Result},
    models::comment::*,
    models::user::User,
    services::moderation::{self, Deletion},
    services::store::ContentStore,
    services::thread::{self, MAX_REPLY_DEPTH},
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct CommentService {
    store: Arc<ContentStore>,
    config: Config,
}

impl CommentService {
    pub async fn new(store: Arc<ContentStore>, config: Config) -> Result<Self> {
        Ok(Self { store, config })
    }

    pub async fn create_comment(
        &self,
        author_id: &str,
        request: CreateCommentRequest,
    ) -> Result<Comment> {
        debug!("Creating comment for post: {}", request.post_id);

        request.validate().map_err(AppError::ValidatorError)?;

        // Verify the post exists
        self.store
            .get_post(&request.post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Post"))?;

        // Verify the parent comment exists and sits on the same post
        if let Some(parent_id) = &request.parent_id {
            let parent = self
                .store
                .get_comment(parent_id)
                .await?
                .ok_or_else(|| AppError::not_found("Parent comment"))?;

            if parent.post_id != request.post_id {
                return Err(AppError::invalid_relation(
                    "Parent comment does not belong to the specified post",
                ));
            }
        }

        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            post_id: request.post_id,
            author_id: author_id.to_string(),
            parent_id: request.parent_id,
            content: request.content,
            status: CommentStatus::Pending,
            // Stamped by the store on write
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        self.store.create_comment(comment).await
    }

    pub async fn get_comment(&self, comment_id: &str) -> Result<Comment> {
        self.store
            .get_comment(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Comment"))
    }

    /// Root comments for a post, newest first, each carrying two levels of
    /// replies. Public callers pass `Some(Approved)`; moderation views pass
    /// `None` and see everything.
    pub async fn comments_by_post(
        &self,
        post_id: &str,
        status: Option<CommentStatus>,
    ) -> Result<Vec<CommentThread>> {
        debug!("Listing comments for post: {}", post_id);

        let rows = self.store.comments_by_post(post_id).await?;
        Ok(thread::assemble(rows, status))
    }

    /// A user's comments, newest first, each with its post and parent
    /// attached.
    pub async fn comments_by_user(&self, author_id: &str) -> Result<Vec<CommentWithContext>> {
        let mut rows = self.store.comments_by_author(author_id).await?;
        rows.sort_by(thread::newest_first);

        let mut result = Vec::with_capacity(rows.len());
        for comment in rows {
            let post = self
                .store
                .get_post(&comment.post_id)
                .await?
                .ok_or_else(|| AppError::internal("Comment references a missing post"))?;

            let parent = match &comment.parent_id {
                Some(parent_id) => self.store.get_comment(parent_id).await?,
                None => None,
            };

            result.push(CommentWithContext {
                comment,
                post,
                parent,
            });
        }

        Ok(result)
    }

    /// Generic paginated query over all comments. Each page item carries its
    /// replies, loaded by repeated id lookups down to [`MAX_REPLY_DEPTH`].
    pub async fn find_comments(&self, filter: CommentFilter) -> Result<CommentPage> {
        let take = filter
            .take
            .unwrap_or(self.config.default_comments_per_page)
            .min(self.config.max_comments_per_page);
        let skip = filter.skip.unwrap_or(0);

        let mut matches = self.store.filter_comments(&filter).await?;
        let total_count = matches.len();
        matches.sort_by(thread::newest_first);

        let mut comments = Vec::new();
        for row in matches.into_iter().skip(skip).take(take) {
            comments.push(self.load_thread(row, filter.status).await?);
        }

        Ok(CommentPage {
            comments,
            total_count,
            has_more: skip + take < total_count,
        })
    }

    pub async fn update_comment(
        &self,
        comment_id: &str,
        actor: &User,
        request: UpdateCommentRequest,
    ) -> Result<Comment> {
        request.validate().map_err(AppError::ValidatorError)?;

        let existing = self.get_comment(comment_id).await?;

        if request.content.is_some()
            && !moderation::can_edit_content(&existing.author_id, &actor.id, actor.role)
        {
            return Err(AppError::forbidden("You can only edit your own comments"));
        }

        if let Some(requested) = request.status {
            if !moderation::can_set_status(existing.status, requested, actor.role) {
                return Err(AppError::forbidden(
                    "Only moderators can change comment status",
                ));
            }
        }

        self.store
            .update_comment(comment_id, |comment| {
                if let Some(content) = request.content {
                    comment.content = content;
                }
                if let Some(status) = request.status {
                    comment.status = status;
                }
            })
            .await?
            .ok_or_else(|| AppError::not_found("Comment"))
    }

    pub async fn approve_comment(&self, comment_id: &str, actor: &User) -> Result<Comment> {
        self.moderate(comment_id, actor, CommentStatus::Approved)
            .await
    }

    pub async fn reject_comment(&self, comment_id: &str, actor: &User) -> Result<Comment> {
        self.moderate(comment_id, actor, CommentStatus::Rejected)
            .await
    }

    /// Deletes a comment. Leaf comments are removed outright; a comment with
    /// replies is tombstoned instead so its thread keeps its shape.
    pub async fn delete_comment(&self, comment_id: &str, actor: &User) -> Result<()> {
        let existing = self.get_comment(comment_id).await?;

        if !moderation::can_delete(&existing.author_id, &actor.id, actor.role) {
            return Err(AppError::forbidden("You can only delete your own comments"));
        }

        let replies = self.store.replies_of(comment_id).await?;
        match moderation::deletion_of(replies.len()) {
            Deletion::Hard => {
                if !self.store.delete_comment(comment_id).await? {
                    return Err(AppError::not_found("Comment"));
                }
                info!("Deleted comment {}", comment_id);
            }
            Deletion::Tombstone => {
                self.store
                    .update_comment(comment_id, |comment| {
                        comment.content = moderation::TOMBSTONE_CONTENT.to_string();
                        comment.status = CommentStatus::Rejected;
                    })
                    .await?
                    .ok_or_else(|| AppError::not_found("Comment"))?;
                info!(
                    "Tombstoned comment {} ({} replies kept)",
                    comment_id,
                    replies.len()
                );
            }
        }

        Ok(())
    }

    // Helper methods

    async fn moderate(
        &self,
        comment_id: &str,
        actor: &User,
        requested: CommentStatus,
    ) -> Result<Comment> {
        let existing = self.get_comment(comment_id).await?;

        if !moderation::can_set_status(existing.status, requested, actor.role) {
            return Err(AppError::forbidden("Only moderators can moderate comments"));
        }

        debug!("Setting comment {} status to {:?}", comment_id, requested);

        self.store
            .update_comment(comment_id, |comment| {
                comment.status = requested;
            })
            .await?
            .ok_or_else(|| AppError::not_found("Comment"))
    }

    /// Loads one comment's replies by repeated id-indexed lookups, two
    /// levels deep, and shapes them with the assembler.
    async fn load_thread(
        &self,
        comment: Comment,
        status: Option<CommentStatus>,
    ) -> Result<CommentThread> {
        let mut children: HashMap<String, Vec<Comment>> = HashMap::new();

        let mut frontier = vec![comment.id.clone()];
        for _ in 0..MAX_REPLY_DEPTH {
            let mut next = Vec::new();
            for parent_id in frontier {
                let replies = self.store.replies_of(&parent_id).await?;
                next.extend(replies.iter().map(|reply| reply.id.clone()));
                children.insert(parent_id, replies);
            }
            frontier = next;
        }

        Ok(thread::attach_replies(
            comment,
            &children,
            status,
            MAX_REPLY_DEPTH,
        ))
    }
}
