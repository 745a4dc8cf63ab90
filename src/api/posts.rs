use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Redirect, Response},
    Form,
};
use serde_json::{json, Value};

use crate::api::{parse_post_id, post_url};
use crate::app_state::AppState;
use crate::error::AppResult;
use crate::infrastructure::middleware::{AuthenticatedViewer, Vc};
use crate::services::{CommentForm, EditAccess, PostDetail, PostForm};

pub async fn new_post_form(
    State(state): State<AppState>,
    _viewer: AuthenticatedViewer,
) -> AppResult<Json<Value>> {
    let groups = state.posts.list_groups().await?;
    Ok(Json(json!({ "groups": groups })))
}

pub async fn new_post(
    State(state): State<AppState>,
    viewer: AuthenticatedViewer,
    Form(form): Form<PostForm>,
) -> AppResult<Redirect> {
    state.posts.create_post(&viewer.user, &form).await?;
    Ok(Redirect::to("/"))
}

pub async fn post_view(
    State(state): State<AppState>,
    vc: Vc,
    Path((username, post_id)): Path<(String, String)>,
) -> AppResult<Json<PostDetail>> {
    let post_id = parse_post_id(&post_id)?;
    let detail = state.posts.post_detail(&vc, &username, post_id).await?;
    Ok(Json(detail))
}

/// Edit form. Anyone but the author is sent to the read-only view.
pub async fn post_edit_form(
    State(state): State<AppState>,
    vc: Vc,
    Path((username, post_id)): Path<(String, String)>,
) -> AppResult<Response> {
    let post_id = parse_post_id(&post_id)?;
    match state.posts.edit_access(&vc, post_id).await? {
        EditAccess::Allowed(post) => {
            let groups = state.posts.list_groups().await?;
            Ok(Json(json!({ "post": post, "groups": groups })).into_response())
        }
        EditAccess::NotAuthor => Ok(Redirect::to(&post_url(&username, post_id)).into_response()),
    }
}

pub async fn post_edit(
    State(state): State<AppState>,
    vc: Vc,
    Path((username, post_id)): Path<(String, String)>,
    Form(form): Form<PostForm>,
) -> AppResult<Redirect> {
    let post_id = parse_post_id(&post_id)?;
    // Saved or not the author: both end on the post page.
    state.posts.edit_post(&vc, post_id, &form).await?;
    Ok(Redirect::to(&post_url(&username, post_id)))
}

pub async fn add_comment(
    State(state): State<AppState>,
    viewer: AuthenticatedViewer,
    Path((username, post_id)): Path<(String, String)>,
    Form(form): Form<CommentForm>,
) -> AppResult<Redirect> {
    let post_id = parse_post_id(&post_id)?;
    state.posts.add_comment(&viewer.user, post_id, &form).await?;
    Ok(Redirect::to(&post_url(&username, post_id)))
}

/// A GET on the comment endpoint only bounces back to the post.
pub async fn comment_redirect(
    _viewer: AuthenticatedViewer,
    Path((username, post_id)): Path<(String, String)>,
) -> AppResult<Redirect> {
    let post_id = parse_post_id(&post_id)?;
    Ok(Redirect::to(&post_url(&username, post_id)))
}
