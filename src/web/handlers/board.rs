//! Board page handlers.
//!
//! Every handler takes a [`CurrentUser`], so anonymous requests are sent to
//! the login page before any of this runs.

use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::auth::session::take_flash;
use crate::board::{BoardService, ListQuery, PostType};
use crate::web::error::WebError;
use crate::web::extract::CurrentUser;
use crate::web::views::{EditTemplate, ListTemplate, Viewer, ViewTemplate, WriteTemplate};
use crate::BoardError;

use super::{back_target, deny, render, AppState};

/// Query parameters of the post list.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    pub search: Option<String>,
}

/// `?type=` on the write form.
#[derive(Debug, Default, Deserialize)]
pub struct TypeParam {
    #[serde(rename = "type")]
    pub post_type: Option<String>,
}

/// Submitted post form, for both create and edit.
#[derive(Debug, Deserialize)]
pub struct PostForm {
    #[serde(rename = "type", default)]
    pub post_type: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

fn parse_post_id(raw: &str) -> Result<i64, WebError> {
    raw.parse()
        .map_err(|_| WebError::NotFound("게시글을 찾을 수 없습니다.".to_string()))
}

/// GET /posts
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    session: Session,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, WebError> {
    let query = ListQuery::from_params(
        params.page.as_deref(),
        params.post_type.as_deref(),
        params.search.as_deref(),
    );
    let page = BoardService::new(state.db.pool()).list_posts(&query).await?;
    let flash = take_flash(&session).await?;

    render(&ListTemplate::new(
        &page,
        Viewer::from(&user),
        flash,
        &state.timezone,
    ))
}

/// GET /posts/write
pub async fn write_form(
    CurrentUser(user): CurrentUser,
    session: Session,
    Query(params): Query<TypeParam>,
) -> Result<Html<String>, WebError> {
    let post_type = PostType::from_param(params.post_type.as_deref());
    let flash = take_flash(&session).await?;
    render(&WriteTemplate::new(post_type, Viewer::from(&user), flash))
}

/// POST /posts/write
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<PostForm>,
) -> Result<Redirect, WebError> {
    let requested = PostType::from_param(form.post_type.as_deref());
    let post = BoardService::new(state.db.pool())
        .create_post(&user, requested, &form.title, &form.content)
        .await?;

    Ok(Redirect::to(&format!("/posts?type={}", post.post_type)))
}

/// GET /posts/view/:id
pub async fn view_post(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    session: Session,
    Path(id): Path<String>,
) -> Result<Html<String>, WebError> {
    let post_id = parse_post_id(&id)?;
    let post = BoardService::new(state.db.pool()).view_post(post_id).await?;
    let flash = take_flash(&session).await?;

    render(&ViewTemplate::new(
        &post,
        Viewer::from(&user),
        flash,
        &state.timezone,
    ))
}

/// GET /posts/edit/:id
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    session: Session,
    headers: HeaderMap,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let post_id = parse_post_id(&id)?;
    match BoardService::new(state.db.pool())
        .edit_form(&user, post_id)
        .await
    {
        Ok(post) => {
            let flash = take_flash(&session).await?;
            Ok(render(&EditTemplate::new(&post, Viewer::from(&user), flash))?.into_response())
        }
        Err(BoardError::Permission(denied)) => {
            let target = back_target(&headers, uri.path(), &format!("/posts/view/{post_id}"));
            Ok(deny(&session, target, denied).await?.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /posts/edit/:id
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    session: Session,
    headers: HeaderMap,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
    Form(form): Form<PostForm>,
) -> Result<Redirect, WebError> {
    let post_id = parse_post_id(&id)?;
    let requested = PostType::from_param(form.post_type.as_deref());

    match BoardService::new(state.db.pool())
        .update_post(&user, post_id, requested, &form.title, &form.content)
        .await
    {
        Ok(()) => Ok(Redirect::to(&format!("/posts/view/{post_id}"))),
        Err(BoardError::Permission(denied)) => {
            let target = back_target(&headers, uri.path(), &format!("/posts/view/{post_id}"));
            deny(&session, target, denied).await
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /posts/delete/:id
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    session: Session,
    headers: HeaderMap,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> Result<Redirect, WebError> {
    let post_id = parse_post_id(&id)?;

    match BoardService::new(state.db.pool())
        .delete_post(&user, post_id)
        .await
    {
        Ok(()) => Ok(Redirect::to("/posts")),
        Err(BoardError::Permission(denied)) => {
            deny(&session, back_target(&headers, uri.path(), "/posts"), denied).await
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_post_id() {
        assert_eq!(parse_post_id("42").unwrap(), 42);
        assert!(matches!(parse_post_id("abc"), Err(WebError::NotFound(_))));
        assert!(matches!(parse_post_id(""), Err(WebError::NotFound(_))));
    }
}
