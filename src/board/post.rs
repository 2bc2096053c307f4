//! Post model for postboard.

use super::types::PostType;

/// A stored post.
#[derive(Debug, Clone)]
pub struct Post {
    /// Unique post ID.
    pub post_id: i64,
    /// ID of the user who owns the post.
    pub user_id: i64,
    /// Board the post belongs to.
    pub post_type: PostType,
    pub title: String,
    pub content: String,
    /// Number of times the detail page was shown.
    pub view_count: i64,
    /// Creation timestamp (UTC, set by the store).
    pub created_at: String,
}

impl Post {
    /// Check if the given user owns this post.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// A post joined with its owner's display name.
#[derive(Debug, Clone)]
pub struct PostWithAuthor {
    pub post: Post,
    /// Owner's `user_name`.
    pub author_name: String,
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: i64,
    pub post_type: PostType,
    pub title: String,
    pub content: String,
}

impl NewPost {
    /// Create a new free-board post.
    pub fn new(user_id: i64, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            user_id,
            post_type: PostType::Free,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Set the post type.
    pub fn with_type(mut self, post_type: PostType) -> Self {
        self.post_type = post_type;
        self
    }
}

/// Replacement values for an edited post.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub post_type: PostType,
    pub title: String,
    pub content: String,
}

impl PostUpdate {
    /// Create an update.
    pub fn new(post_type: PostType, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            post_type,
            title: title.into(),
            content: content.into(),
        }
    }
}
