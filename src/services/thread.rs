use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{Comment, CommentStatus, CommentThread};

/// How many reply levels get materialized under a root comment. The platform
/// renders two; anything deeper stays collapsed until requested again with
/// the reply itself as the root.
pub const MAX_REPLY_DEPTH: usize = 2;

/// Recency ordering used at every level of a thread: newest `created_at`
/// first, ties broken by id descending so the order is total and stable.
pub fn newest_first(a: &Comment, b: &Comment) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

fn passes(comment: &Comment, status: Option<CommentStatus>) -> bool {
    status.map_or(true, |wanted| comment.status == wanted)
}

/// Groups a flat row set by parent id. Rows without a parent are reachable
/// through the roots, not the index.
pub fn children_index(comments: &[Comment]) -> HashMap<String, Vec<Comment>> {
    let mut index: HashMap<String, Vec<Comment>> = HashMap::new();
    for comment in comments {
        if let Some(parent_id) = &comment.parent_id {
            index
                .entry(parent_id.clone())
                .or_default()
                .push(comment.clone());
        }
    }
    index
}

/// Hangs replies off `comment` from the id-indexed children map, recursing
/// down to `depth` levels. The status filter applies uniformly at every
/// level it visits.
pub fn attach_replies(
    comment: Comment,
    children: &HashMap<String, Vec<Comment>>,
    status: Option<CommentStatus>,
    depth: usize,
) -> CommentThread {
    let replies = if depth == 0 {
        Vec::new()
    } else {
        let mut rows: Vec<Comment> = children
            .get(&comment.id)
            .map(|rows| {
                rows.iter()
                    .filter(|row| passes(row, status))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        rows.sort_by(newest_first);
        rows.into_iter()
            .map(|row| attach_replies(row, children, status, depth - 1))
            .collect()
    };

    CommentThread { comment, replies }
}

/// Shapes one post's flat comment rows into the nested view: roots newest
/// first, each carrying up to [`MAX_REPLY_DEPTH`] levels of replies.
pub fn assemble(comments: Vec<Comment>, status: Option<CommentStatus>) -> Vec<CommentThread> {
    let children = children_index(&comments);

    let mut roots: Vec<Comment> = comments
        .into_iter()
        .filter(|comment| comment.is_root() && passes(comment, status))
        .collect();
    roots.sort_by(newest_first);

    roots
        .into_iter()
        .map(|root| attach_replies(root, &children, status, MAX_REPLY_DEPTH))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn comment(id: &str, parent: Option<&str>, minutes: i64, status: CommentStatus) -> Comment {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let at = base + Duration::minutes(minutes);
        Comment {
            id: id.to_string(),
            post_id: "post-1".to_string(),
            author_id: "author-1".to_string(),
            parent_id: parent.map(String::from),
            content: format!("comment {}", id),
            status,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_roots_newest_first() {
        let rows = vec![
            comment("a", None, 0, CommentStatus::Approved),
            comment("b", None, 5, CommentStatus::Approved),
            comment("c", None, 2, CommentStatus::Approved),
        ];
        let threads = assemble(rows, None);
        let ids: Vec<&str> = threads.iter().map(|t| t.comment.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_tie_break_is_id_descending() {
        let rows = vec![
            comment("a", None, 0, CommentStatus::Approved),
            comment("b", None, 0, CommentStatus::Approved),
            comment("c", None, 0, CommentStatus::Approved),
        ];
        let threads = assemble(rows, None);
        let ids: Vec<&str> = threads.iter().map(|t| t.comment.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_nesting_stops_at_max_depth() {
        let rows = vec![
            comment("root", None, 0, CommentStatus::Approved),
            comment("level1", Some("root"), 1, CommentStatus::Approved),
            comment("level2", Some("level1"), 2, CommentStatus::Approved),
            comment("level3", Some("level2"), 3, CommentStatus::Approved),
        ];
        let threads = assemble(rows, None);
        assert_eq!(threads.len(), 1);

        let level1 = &threads[0].replies;
        assert_eq!(level1.len(), 1);
        let level2 = &level1[0].replies;
        assert_eq!(level2.len(), 1);
        assert_eq!(level2[0].comment.id, "level2");
        // The third level exists in the store but is not expanded here.
        assert!(level2[0].replies.is_empty());
    }

    #[test]
    fn test_status_filter_applies_at_every_level() {
        let rows = vec![
            comment("root", None, 0, CommentStatus::Approved),
            comment("hidden-root", None, 1, CommentStatus::Pending),
            comment("reply-ok", Some("root"), 2, CommentStatus::Approved),
            comment("reply-hidden", Some("root"), 3, CommentStatus::Rejected),
            comment("nested-ok", Some("reply-ok"), 4, CommentStatus::Approved),
            comment("nested-hidden", Some("reply-ok"), 5, CommentStatus::Pending),
        ];
        let threads = assemble(rows, Some(CommentStatus::Approved));
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].comment.id, "root");
        assert_eq!(threads[0].replies.len(), 1);
        assert_eq!(threads[0].replies[0].comment.id, "reply-ok");
        assert_eq!(threads[0].replies[0].replies.len(), 1);
        assert_eq!(threads[0].replies[0].replies[0].comment.id, "nested-ok");
    }

    #[test]
    fn test_no_filter_returns_all_statuses() {
        let rows = vec![
            comment("root", None, 0, CommentStatus::Pending),
            comment("reply", Some("root"), 1, CommentStatus::Rejected),
        ];
        let threads = assemble(rows, None);
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].replies.len(), 1);
    }
}
