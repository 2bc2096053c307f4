//! Board service for postboard.
//!
//! High-level post operations with permission checks and pagination. The web
//! handlers call these and only decide how to present the outcome.

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::auth::{check_post_edit, effective_post_type, PermissionError};
use crate::db::User;
use crate::{BoardError, Result};

use super::post::{NewPost, Post, PostUpdate, PostWithAuthor};
use super::repository::PostRepository;
use super::types::PostType;

/// Number of posts per list page.
pub const PAGE_SIZE: i64 = 10;

/// Parse a `page` parameter. Absent, non-numeric or non-positive values
/// mean page 1.
pub fn parse_page(value: Option<&str>) -> i64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|&page| page > 0)
        .unwrap_or(1)
}

/// Number of pages needed for `count` items, 0 for none.
pub fn total_pages(count: i64, page_size: i64) -> i64 {
    if count <= 0 {
        0
    } else {
        (count + page_size - 1) / page_size
    }
}

/// Normalized list parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: i64,
    pub post_type: PostType,
    /// Title substring; empty matches every post.
    pub search: String,
}

impl ListQuery {
    /// Build from raw query-string values.
    pub fn from_params(page: Option<&str>, post_type: Option<&str>, search: Option<&str>) -> Self {
        Self {
            page: parse_page(page),
            post_type: PostType::from_param(post_type),
            search: search.unwrap_or_default().to_string(),
        }
    }

    /// Rows to skip for this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(PAGE_SIZE)
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::from_params(None, None, None)
    }
}

/// One page of the post list.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<PostWithAuthor>,
    pub current_page: i64,
    pub total_pages: i64,
    /// Number of matching posts across all pages.
    pub total_count: i64,
    pub post_type: PostType,
    pub search: String,
}

/// Service for post operations.
pub struct BoardService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BoardService<'a> {
    /// Create a new BoardService with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    fn posts(&self) -> PostRepository<'a> {
        PostRepository::new(self.pool)
    }

    /// List one page of posts of a type, filtered by title.
    ///
    /// Count and page are two separate reads; a write in between may make
    /// them disagree.
    pub async fn list_posts(&self, query: &ListQuery) -> Result<PostPage> {
        let repo = self.posts();
        let total_count = repo.count_matching(query.post_type, &query.search).await?;
        let posts = repo
            .list_matching(query.post_type, &query.search, PAGE_SIZE, query.offset())
            .await?;

        Ok(PostPage {
            posts,
            current_page: query.page,
            total_pages: total_pages(total_count, PAGE_SIZE),
            total_count,
            post_type: query.post_type,
            search: query.search.clone(),
        })
    }

    /// Create a post owned by `user`.
    ///
    /// A notice requested by a non-admin is stored as a free post.
    pub async fn create_post(
        &self,
        user: &User,
        requested_type: PostType,
        title: &str,
        content: &str,
    ) -> Result<Post> {
        let post_type = effective_post_type(user, requested_type);
        if post_type != requested_type {
            warn!(
                user_id = user.user_id,
                "Non-admin notice downgraded to free post"
            );
        }

        let post = self
            .posts()
            .create(&NewPost::new(user.user_id, title, content).with_type(post_type))
            .await?;

        info!(
            post_id = post.post_id,
            user_id = user.user_id,
            post_type = %post.post_type,
            "Post created"
        );
        Ok(post)
    }

    /// Count a view and fetch the post with its author.
    pub async fn view_post(&self, post_id: i64) -> Result<PostWithAuthor> {
        let repo = self.posts();
        repo.increment_view_count(post_id).await?;
        repo.get_with_author(post_id)
            .await?
            .ok_or_else(|| BoardError::NotFound("post".to_string()))
    }

    /// Fetch a post for the edit form, checking that `user` may edit it.
    pub async fn edit_form(&self, user: &User, post_id: i64) -> Result<Post> {
        let post = self
            .posts()
            .get_by_id(post_id)
            .await?
            .ok_or_else(|| BoardError::NotFound("post".to_string()))?;

        if let Err(e) = check_post_edit(user, &post) {
            warn!(post_id, user_id = user.user_id, reason = %e, "Edit denied");
            return Err(e.into());
        }
        Ok(post)
    }

    /// Replace a post's type, title and content.
    ///
    /// The edit permission is checked again here, and a non-admin's post is
    /// always stored as free.
    pub async fn update_post(
        &self,
        user: &User,
        post_id: i64,
        requested_type: PostType,
        title: &str,
        content: &str,
    ) -> Result<()> {
        self.edit_form(user, post_id).await?;

        let update = PostUpdate::new(effective_post_type(user, requested_type), title, content);
        if !self.posts().update(post_id, &update).await? {
            return Err(BoardError::NotFound("post".to_string()));
        }

        info!(post_id, user_id = user.user_id, "Post updated");
        Ok(())
    }

    /// Delete a post. Admins may delete any post, others only their own.
    ///
    /// Deleting nothing is a denial, whether the post is missing or owned by
    /// someone else.
    pub async fn delete_post(&self, user: &User, post_id: i64) -> Result<()> {
        let repo = self.posts();
        let deleted = if user.is_admin() {
            repo.delete(post_id).await?
        } else {
            repo.delete_owned(post_id, user.user_id).await?
        };

        if deleted == 0 {
            warn!(post_id, user_id = user.user_id, "Delete denied");
            return Err(PermissionError::DeleteDenied.into());
        }

        info!(post_id, user_id = user.user_id, "Post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, NewUser, Role, UserRepository};

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    async fn create_user(db: &Database, name: &str, role: Role) -> User {
        UserRepository::new(db.pool())
            .create(&NewUser::new(name, format!("{name}@example.com"), "hash").with_role(role))
            .await
            .unwrap()
    }

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-3")), 1);
        assert_eq!(parse_page(Some("2")), 2);
        assert_eq!(parse_page(Some(" 7 ")), 7);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, PAGE_SIZE), 0);
        assert_eq!(total_pages(1, PAGE_SIZE), 1);
        assert_eq!(total_pages(10, PAGE_SIZE), 1);
        assert_eq!(total_pages(11, PAGE_SIZE), 2);
        assert_eq!(total_pages(25, PAGE_SIZE), 3);
    }

    #[test]
    fn test_list_query_defaults() {
        let query = ListQuery::default();
        assert_eq!(query.page, 1);
        assert_eq!(query.post_type, PostType::Free);
        assert_eq!(query.search, "");
        assert_eq!(query.offset(), 0);

        let query = ListQuery::from_params(Some("3"), Some("notice"), Some("공지"));
        assert_eq!(query.offset(), 20);
        assert_eq!(query.post_type, PostType::Notice);
        assert_eq!(query.search, "공지");
    }

    #[tokio::test]
    async fn test_list_posts_empty_board() {
        let db = setup_db().await;
        let service = BoardService::new(db.pool());

        let page = service.list_posts(&ListQuery::default()).await.unwrap();
        assert!(page.posts.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_count, 0);
        assert_eq!(page.current_page, 1);
    }

    #[tokio::test]
    async fn test_list_posts_pagination() {
        let db = setup_db().await;
        let user = create_user(&db, "kim", Role::Member).await;
        let service = BoardService::new(db.pool());

        for i in 1..=25 {
            service
                .create_post(&user, PostType::Free, &format!("글 {i}"), "내용")
                .await
                .unwrap();
        }

        let first = service.list_posts(&ListQuery::default()).await.unwrap();
        assert_eq!(first.total_count, 25);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.posts.len(), 10);
        assert_eq!(first.posts[0].post.title, "글 25");

        let last = service
            .list_posts(&ListQuery::from_params(Some("3"), None, None))
            .await
            .unwrap();
        assert_eq!(last.posts.len(), 5);
        assert_eq!(last.posts[4].post.title, "글 1");

        let beyond = service
            .list_posts(&ListQuery::from_params(Some("9"), None, None))
            .await
            .unwrap();
        assert!(beyond.posts.is_empty());
        assert_eq!(beyond.total_pages, 3);
    }

    #[tokio::test]
    async fn test_list_posts_search() {
        let db = setup_db().await;
        let user = create_user(&db, "kim", Role::Member).await;
        let service = BoardService::new(db.pool());

        service
            .create_post(&user, PostType::Free, "러스트 질문", "c")
            .await
            .unwrap();
        service
            .create_post(&user, PostType::Free, "점심 메뉴", "러스트")
            .await
            .unwrap();

        let found = service
            .list_posts(&ListQuery::from_params(None, None, Some("러스트")))
            .await
            .unwrap();
        assert_eq!(found.total_count, 1);
        assert_eq!(found.posts[0].post.title, "러스트 질문");
        assert_eq!(found.search, "러스트");

        let all = service
            .list_posts(&ListQuery::from_params(None, None, Some("")))
            .await
            .unwrap();
        assert_eq!(all.total_count, 2);
    }

    #[tokio::test]
    async fn test_created_post_listed_first() {
        let db = setup_db().await;
        let admin = create_user(&db, "admin", Role::Admin).await;
        let service = BoardService::new(db.pool());

        service
            .create_post(&admin, PostType::Notice, "old notice", "c")
            .await
            .unwrap();
        let post = service
            .create_post(&admin, PostType::Notice, "new notice", "c")
            .await
            .unwrap();

        let page = service
            .list_posts(&ListQuery::from_params(None, Some("notice"), None))
            .await
            .unwrap();
        assert_eq!(page.posts[0].post.post_id, post.post_id);
        assert_eq!(page.posts[0].author_name, "admin");
    }

    #[tokio::test]
    async fn test_create_notice_downgraded_for_member() {
        let db = setup_db().await;
        let member = create_user(&db, "kim", Role::Member).await;
        let service = BoardService::new(db.pool());

        let post = service
            .create_post(&member, PostType::Notice, "notice?", "c")
            .await
            .unwrap();
        assert_eq!(post.post_type, PostType::Free);
        assert_eq!(post.view_count, 0);
    }

    #[tokio::test]
    async fn test_view_post_increments_count() {
        let db = setup_db().await;
        let user = create_user(&db, "kim", Role::Member).await;
        let service = BoardService::new(db.pool());

        let post = service
            .create_post(&user, PostType::Free, "t", "c")
            .await
            .unwrap();

        let first = service.view_post(post.post_id).await.unwrap();
        assert_eq!(first.post.view_count, 1);
        let second = service.view_post(post.post_id).await.unwrap();
        assert_eq!(second.post.view_count, 2);
        assert_eq!(second.author_name, "kim");
    }

    #[tokio::test]
    async fn test_view_missing_post() {
        let db = setup_db().await;
        let service = BoardService::new(db.pool());

        let result = service.view_post(404).await;
        assert!(matches!(result, Err(BoardError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_edit_form_permissions() {
        let db = setup_db().await;
        let admin = create_user(&db, "admin", Role::Admin).await;
        let kim = create_user(&db, "kim", Role::Member).await;
        let lee = create_user(&db, "lee", Role::Member).await;
        let service = BoardService::new(db.pool());

        let notice = service
            .create_post(&admin, PostType::Notice, "notice", "c")
            .await
            .unwrap();
        let kims = service
            .create_post(&kim, PostType::Free, "kim's", "c")
            .await
            .unwrap();

        assert!(matches!(
            service.edit_form(&kim, notice.post_id).await,
            Err(BoardError::Permission(PermissionError::NoticeAdminOnly))
        ));
        assert!(matches!(
            service.edit_form(&lee, kims.post_id).await,
            Err(BoardError::Permission(PermissionError::NotOwner))
        ));
        assert_eq!(
            service.edit_form(&kim, kims.post_id).await.unwrap().post_id,
            kims.post_id
        );
        assert!(service.edit_form(&admin, kims.post_id).await.is_ok());
        assert!(matches!(
            service.edit_form(&kim, 999).await,
            Err(BoardError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_post_forces_free_for_member() {
        let db = setup_db().await;
        let kim = create_user(&db, "kim", Role::Member).await;
        let service = BoardService::new(db.pool());

        let post = service
            .create_post(&kim, PostType::Free, "t", "c")
            .await
            .unwrap();
        service
            .update_post(&kim, post.post_id, PostType::Notice, "new", "body")
            .await
            .unwrap();

        let stored = PostRepository::new(db.pool())
            .get_by_id(post.post_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.post_type, PostType::Free);
        assert_eq!(stored.title, "new");
        assert_eq!(stored.content, "body");
    }

    #[tokio::test]
    async fn test_update_post_admin_keeps_notice() {
        let db = setup_db().await;
        let admin = create_user(&db, "admin", Role::Admin).await;
        let kim = create_user(&db, "kim", Role::Member).await;
        let service = BoardService::new(db.pool());

        let post = service
            .create_post(&kim, PostType::Free, "t", "c")
            .await
            .unwrap();
        service
            .update_post(&admin, post.post_id, PostType::Notice, "t", "c")
            .await
            .unwrap();

        let stored = PostRepository::new(db.pool())
            .get_by_id(post.post_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.post_type, PostType::Notice);
    }

    #[tokio::test]
    async fn test_update_post_rechecks_ownership() {
        let db = setup_db().await;
        let kim = create_user(&db, "kim", Role::Member).await;
        let lee = create_user(&db, "lee", Role::Member).await;
        let service = BoardService::new(db.pool());

        let post = service
            .create_post(&kim, PostType::Free, "original", "c")
            .await
            .unwrap();

        let result = service
            .update_post(&lee, post.post_id, PostType::Free, "hijacked", "c")
            .await;
        assert!(matches!(
            result,
            Err(BoardError::Permission(PermissionError::NotOwner))
        ));

        let stored = PostRepository::new(db.pool())
            .get_by_id(post.post_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.title, "original");
    }

    #[tokio::test]
    async fn test_delete_post_rules() {
        let db = setup_db().await;
        let admin = create_user(&db, "admin", Role::Admin).await;
        let kim = create_user(&db, "kim", Role::Member).await;
        let lee = create_user(&db, "lee", Role::Member).await;
        let service = BoardService::new(db.pool());

        let first = service
            .create_post(&kim, PostType::Free, "one", "c")
            .await
            .unwrap();
        let second = service
            .create_post(&kim, PostType::Free, "two", "c")
            .await
            .unwrap();

        assert!(matches!(
            service.delete_post(&lee, first.post_id).await,
            Err(BoardError::Permission(PermissionError::DeleteDenied))
        ));
        service.delete_post(&kim, first.post_id).await.unwrap();
        service.delete_post(&admin, second.post_id).await.unwrap();

        assert!(matches!(
            service.delete_post(&admin, second.post_id).await,
            Err(BoardError::Permission(PermissionError::DeleteDenied))
        ));
    }
}
