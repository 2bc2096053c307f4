//! Post repository for postboard.

use sqlx::SqlitePool;

use super::post::{NewPost, Post, PostUpdate, PostWithAuthor};
use super::types::PostType;
use crate::{BoardError, Result};

const POST_COLUMNS: &str = "p.post_id, p.user_id, p.type AS post_type, p.title, p.content,
                            p.view_count, p.created_at";

/// Repository for post operations.
pub struct PostRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new post. `view_count` starts at 0 and `created_at` is set
    /// by the store.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let result =
            sqlx::query("INSERT INTO posts (user_id, type, title, content) VALUES (?, ?, ?, ?)")
                .bind(new_post.user_id)
                .bind(new_post.post_type.as_str())
                .bind(&new_post.title)
                .bind(&new_post.content)
                .execute(self.pool)
                .await
                .map_err(|e| BoardError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| BoardError::NotFound("post".to_string()))
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, post_id: i64) -> Result<Option<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts p WHERE p.post_id = ?");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(post_id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(row.map(PostRow::into_post))
    }

    /// Get a post joined with its owner's name.
    pub async fn get_with_author(&self, post_id: i64) -> Result<Option<PostWithAuthor>> {
        let sql = format!(
            "SELECT {POST_COLUMNS}, u.user_name
             FROM posts p JOIN users u ON p.user_id = u.user_id
             WHERE p.post_id = ?"
        );
        let row = sqlx::query_as::<_, PostWithAuthorRow>(&sql)
            .bind(post_id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(row.map(PostWithAuthorRow::into_post_with_author))
    }

    /// Count posts of a type whose title contains `search`.
    pub async fn count_matching(&self, post_type: PostType, search: &str) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM posts WHERE type = ? AND title LIKE ? ESCAPE '\\'",
        )
        .bind(post_type.as_str())
        .bind(like_pattern(search))
        .fetch_one(self.pool)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;
        Ok(count.0)
    }

    /// List one page of matching posts, newest first.
    pub async fn list_matching(
        &self,
        post_type: PostType,
        search: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostWithAuthor>> {
        let sql = format!(
            "SELECT {POST_COLUMNS}, u.user_name
             FROM posts p JOIN users u ON p.user_id = u.user_id
             WHERE p.type = ? AND p.title LIKE ? ESCAPE '\\'
             ORDER BY p.created_at DESC, p.post_id DESC
             LIMIT ? OFFSET ?"
        );
        let rows = sqlx::query_as::<_, PostWithAuthorRow>(&sql)
            .bind(post_type.as_str())
            .bind(like_pattern(search))
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await
            .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(PostWithAuthorRow::into_post_with_author)
            .collect())
    }

    /// Add one to a post's view count.
    ///
    /// Returns false if the post does not exist.
    pub async fn increment_view_count(&self, post_id: i64) -> Result<bool> {
        let result = sqlx::query("UPDATE posts SET view_count = view_count + 1 WHERE post_id = ?")
            .bind(post_id)
            .execute(self.pool)
            .await
            .map_err(|e| BoardError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace a post's type, title and content.
    ///
    /// Returns false if the post does not exist.
    pub async fn update(&self, post_id: i64, update: &PostUpdate) -> Result<bool> {
        let result =
            sqlx::query("UPDATE posts SET type = ?, title = ?, content = ? WHERE post_id = ?")
                .bind(update.post_type.as_str())
                .bind(&update.title)
                .bind(&update.content)
                .bind(post_id)
                .execute(self.pool)
                .await
                .map_err(|e| BoardError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a post regardless of owner.
    ///
    /// Returns the number of rows removed.
    pub async fn delete(&self, post_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM posts WHERE post_id = ?")
            .bind(post_id)
            .execute(self.pool)
            .await
            .map_err(|e| BoardError::Database(e.to_string()))?;
        Ok(result.rows_affected())
    }

    /// Delete a post only if `user_id` owns it.
    ///
    /// Returns the number of rows removed.
    pub async fn delete_owned(&self, post_id: i64, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM posts WHERE post_id = ? AND user_id = ?")
            .bind(post_id)
            .bind(user_id)
            .execute(self.pool)
            .await
            .map_err(|e| BoardError::Database(e.to_string()))?;
        Ok(result.rows_affected())
    }
}

/// Build a LIKE pattern matching `search` as a literal substring.
fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Internal struct for mapping database rows to Post.
#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: i64,
    user_id: i64,
    post_type: String,
    title: String,
    content: String,
    view_count: i64,
    created_at: String,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            post_id: self.post_id,
            user_id: self.user_id,
            post_type: self.post_type.parse().unwrap_or_default(),
            title: self.title,
            content: self.content,
            view_count: self.view_count,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostWithAuthorRow {
    #[sqlx(flatten)]
    post: PostRow,
    user_name: String,
}

impl PostWithAuthorRow {
    fn into_post_with_author(self) -> PostWithAuthor {
        PostWithAuthor {
            post: self.post.into_post(),
            author_name: self.user_name,
        }
    }
}
