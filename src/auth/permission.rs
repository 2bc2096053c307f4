//! Post permission rules.

use thiserror::Error;

use crate::board::{Post, PostType};
use crate::db::User;

/// A denied board operation. The message is shown to the user as-is.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionError {
    /// A non-admin tried to edit a notice.
    #[error("공지사항은 관리자만 수정할 수 있습니다.")]
    NoticeAdminOnly,

    /// A non-admin tried to edit someone else's post.
    #[error("권한이 없습니다.")]
    NotOwner,

    /// Nothing was deleted: the post is missing or belongs to someone else.
    #[error("삭제 권한이 없습니다.")]
    DeleteDenied,
}

/// Check whether `user` may edit `post`.
///
/// Notices are admin-only regardless of ownership; other posts may be edited
/// by their owner or an admin.
///
/// ```
/// use postboard::auth::permission::{check_post_edit, PermissionError};
/// # use postboard::board::{Post, PostType};
/// # use postboard::db::{Role, User};
/// # let user = User { user_id: 1, user_name: "kim".into(), email: "kim@example.com".into(),
/// #     password: String::new(), role: Role::Member, created_at: String::new() };
/// # let post = Post { post_id: 1, user_id: 1, post_type: PostType::Notice, title: String::new(),
/// #     content: String::new(), view_count: 0, created_at: String::new() };
/// assert_eq!(check_post_edit(&user, &post), Err(PermissionError::NoticeAdminOnly));
/// ```
pub fn check_post_edit(user: &User, post: &Post) -> Result<(), PermissionError> {
    let is_admin = user.is_admin();

    if post.post_type.is_notice() && !is_admin {
        return Err(PermissionError::NoticeAdminOnly);
    }
    if !post.is_owned_by(user.user_id) && !is_admin {
        return Err(PermissionError::NotOwner);
    }
    Ok(())
}

/// The post type actually stored when `user` submits `requested`.
///
/// Only admins may write notices; anyone else gets a free-board post.
pub fn effective_post_type(user: &User, requested: PostType) -> PostType {
    if user.is_admin() {
        requested
    } else {
        PostType::Free
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Role;

    fn user(user_id: i64, role: Role) -> User {
        User {
            user_id,
            user_name: format!("user{user_id}"),
            email: format!("user{user_id}@example.com"),
            password: "hash".to_string(),
            role,
            created_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    fn post(owner: i64, post_type: PostType) -> Post {
        Post {
            post_id: 10,
            user_id: owner,
            post_type,
            title: "t".to_string(),
            content: "c".to_string(),
            view_count: 0,
            created_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_member_cannot_edit_notice_even_own() {
        let member = user(1, Role::Member);
        assert_eq!(
            check_post_edit(&member, &post(1, PostType::Notice)),
            Err(PermissionError::NoticeAdminOnly)
        );
        assert_eq!(
            check_post_edit(&member, &post(2, PostType::Notice)),
            Err(PermissionError::NoticeAdminOnly)
        );
    }

    #[test]
    fn test_member_cannot_edit_others_free_post() {
        let member = user(1, Role::Member);
        assert_eq!(
            check_post_edit(&member, &post(2, PostType::Free)),
            Err(PermissionError::NotOwner)
        );
    }

    #[test]
    fn test_member_can_edit_own_free_post() {
        let member = user(1, Role::Member);
        assert!(check_post_edit(&member, &post(1, PostType::Free)).is_ok());
    }

    #[test]
    fn test_admin_can_edit_anything() {
        let admin = user(1, Role::Admin);
        assert!(check_post_edit(&admin, &post(2, PostType::Free)).is_ok());
        assert!(check_post_edit(&admin, &post(2, PostType::Notice)).is_ok());
    }

    #[test]
    fn test_effective_post_type() {
        let member = user(1, Role::Member);
        let admin = user(2, Role::Admin);

        assert_eq!(effective_post_type(&member, PostType::Notice), PostType::Free);
        assert_eq!(effective_post_type(&member, PostType::Free), PostType::Free);
        assert_eq!(effective_post_type(&admin, PostType::Notice), PostType::Notice);
        assert_eq!(effective_post_type(&admin, PostType::Free), PostType::Free);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            PermissionError::NoticeAdminOnly.to_string(),
            "공지사항은 관리자만 수정할 수 있습니다."
        );
        assert_eq!(PermissionError::NotOwner.to_string(), "권한이 없습니다.");
        assert_eq!(PermissionError::DeleteDenied.to_string(), "삭제 권한이 없습니다.");
    }
}
