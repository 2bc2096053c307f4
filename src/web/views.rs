//! Askama templates and the view models they render.

use askama::Template;

use crate::board::{Post, PostPage, PostType, PostWithAuthor};
use crate::datetime::format_for_display;
use crate::db::User;

/// Logged-in user as shown in the page header.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub user_id: i64,
    pub user_name: String,
    pub is_admin: bool,
}

impl From<&User> for Viewer {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            user_name: user.user_name.clone(),
            is_admin: user.is_admin(),
        }
    }
}

/// One row of the post list.
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub post_id: i64,
    pub title: String,
    pub author_name: String,
    pub view_count: i64,
    pub created_at: String,
}

impl PostSummary {
    fn new(item: &PostWithAuthor, timezone: &str) -> Self {
        Self {
            post_id: item.post.post_id,
            title: item.post.title.clone(),
            author_name: item.author_name.clone(),
            view_count: item.post.view_count,
            created_at: format_for_display(&item.post.created_at, timezone),
        }
    }
}

/// A numbered link in the pager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub number: i64,
    pub current: bool,
}

/// Page links `1..=total_pages`, marking the current one.
pub fn page_links(current_page: i64, total_pages: i64) -> Vec<PageLink> {
    (1..=total_pages)
        .map(|number| PageLink {
            number,
            current: number == current_page,
        })
        .collect()
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub flash: Option<String>,
    pub error: Option<String>,
    pub email: String,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub flash: Option<String>,
    pub error: Option<String>,
    pub user_name: String,
    pub email: String,
}

/// Post list page.
#[derive(Template)]
#[template(path = "board/list.html")]
pub struct ListTemplate {
    pub flash: Option<String>,
    pub viewer: Viewer,
    /// Board heading: 공지사항 or 자유게시판.
    pub title: &'static str,
    pub post_type: &'static str,
    pub posts: Vec<PostSummary>,
    pub current_page: i64,
    pub total_pages: i64,
    pub pages: Vec<PageLink>,
    pub search: String,
}

impl ListTemplate {
    pub fn new(page: &PostPage, viewer: Viewer, flash: Option<String>, timezone: &str) -> Self {
        Self {
            flash,
            viewer,
            title: page.post_type.display_name(),
            post_type: page.post_type.as_str(),
            posts: page
                .posts
                .iter()
                .map(|item| PostSummary::new(item, timezone))
                .collect(),
            current_page: page.current_page,
            total_pages: page.total_pages,
            pages: page_links(page.current_page, page.total_pages),
            search: page.search.clone(),
        }
    }
}

/// Blank post form.
#[derive(Template)]
#[template(path = "board/write.html")]
pub struct WriteTemplate {
    pub flash: Option<String>,
    pub viewer: Viewer,
    pub post_type: &'static str,
}

impl WriteTemplate {
    pub fn new(post_type: PostType, viewer: Viewer, flash: Option<String>) -> Self {
        Self {
            flash,
            viewer,
            post_type: post_type.as_str(),
        }
    }
}

/// Post detail page.
#[derive(Template)]
#[template(path = "board/view.html")]
pub struct ViewTemplate {
    pub flash: Option<String>,
    pub viewer: Viewer,
    pub post_id: i64,
    pub post_type: &'static str,
    pub board_title: &'static str,
    pub title: String,
    pub content: String,
    pub author_name: String,
    pub view_count: i64,
    pub created_at: String,
    /// Show the edit link. Notices are editable by admins only.
    pub can_edit: bool,
    /// Show the delete link.
    pub can_delete: bool,
}

impl ViewTemplate {
    pub fn new(
        item: &PostWithAuthor,
        viewer: Viewer,
        flash: Option<String>,
        timezone: &str,
    ) -> Self {
        let post = &item.post;
        let owned = post.is_owned_by(viewer.user_id);
        Self {
            flash,
            can_edit: viewer.is_admin || (owned && !post.post_type.is_notice()),
            can_delete: viewer.is_admin || owned,
            viewer,
            post_id: post.post_id,
            post_type: post.post_type.as_str(),
            board_title: post.post_type.display_name(),
            title: post.title.clone(),
            content: post.content.clone(),
            author_name: item.author_name.clone(),
            view_count: post.view_count,
            created_at: format_for_display(&post.created_at, timezone),
        }
    }
}

/// Edit form pre-filled with the stored post.
#[derive(Template)]
#[template(path = "board/edit.html")]
pub struct EditTemplate {
    pub flash: Option<String>,
    pub viewer: Viewer,
    pub post_id: i64,
    pub post_type: &'static str,
    pub title: String,
    pub content: String,
}

impl EditTemplate {
    pub fn new(post: &Post, viewer: Viewer, flash: Option<String>) -> Self {
        Self {
            flash,
            viewer,
            post_id: post.post_id,
            post_type: post.post_type.as_str(),
            title: post.title.clone(),
            content: post.content.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub flash: Option<String>,
    pub message: String,
}
