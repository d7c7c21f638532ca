use crate::models::{CommentStatus, Role};

/// Placeholder content left behind when a comment with replies is deleted.
pub const TOMBSTONE_CONTENT: &str = "[Comment deleted]";

/// How a delete request resolves for a given comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    /// No replies: the row is removed outright.
    Hard,
    /// Replies exist: the row stays addressable so the thread keeps its
    /// shape; content is replaced and status forced to rejected.
    Tombstone,
}

pub fn deletion_of(reply_count: usize) -> Deletion {
    if reply_count == 0 {
        Deletion::Hard
    } else {
        Deletion::Tombstone
    }
}

/// Whether `role` may move a comment from `current` to `requested`.
///
/// Moderation is an unconditional overwrite: a moderator may set any status
/// at any time, backward moves included. Tightening this to a forward-only
/// machine is a product decision; this function is the one place to make it.
pub fn can_set_status(_current: CommentStatus, _requested: CommentStatus, role: Role) -> bool {
    role.is_moderator()
}

/// Content edits are open to the comment's author and to moderators.
pub fn can_edit_content(author_id: &str, actor_id: &str, actor_role: Role) -> bool {
    author_id == actor_id || actor_role.is_moderator()
}

/// Deletes follow the same rule as edits.
pub fn can_delete(author_id: &str, actor_id: &str, actor_role: Role) -> bool {
    can_edit_content(author_id, actor_id, actor_role)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUSES: [CommentStatus; 3] = [
        CommentStatus::Pending,
        CommentStatus::Approved,
        CommentStatus::Rejected,
    ];

    #[test]
    fn test_moderators_may_set_any_status() {
        for current in STATUSES {
            for requested in STATUSES {
                assert!(can_set_status(current, requested, Role::Admin));
                assert!(can_set_status(current, requested, Role::Editor));
            }
        }
    }

    #[test]
    fn test_plain_users_may_never_set_status() {
        for current in STATUSES {
            for requested in STATUSES {
                assert!(!can_set_status(current, requested, Role::User));
            }
        }
    }

    #[test]
    fn test_backward_transitions_are_permitted() {
        // Deliberate: the platform treats moderation as an overwrite, not a
        // one-way machine.
        assert!(can_set_status(
            CommentStatus::Rejected,
            CommentStatus::Approved,
            Role::Editor
        ));
        assert!(can_set_status(
            CommentStatus::Approved,
            CommentStatus::Pending,
            Role::Admin
        ));
    }

    #[test]
    fn test_delete_policy_by_reply_count() {
        assert_eq!(deletion_of(0), Deletion::Hard);
        assert_eq!(deletion_of(1), Deletion::Tombstone);
        assert_eq!(deletion_of(12), Deletion::Tombstone);
    }

    #[test]
    fn test_edit_rights() {
        assert!(can_edit_content("u1", "u1", Role::User));
        assert!(!can_edit_content("u1", "u2", Role::User));
        assert!(can_edit_content("u1", "u2", Role::Editor));
        assert!(can_delete("u1", "u2", Role::Admin));
        assert!(!can_delete("u1", "u2", Role::User));
    }
}
