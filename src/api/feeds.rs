use axum::{
    extract::{Path, Query, State},
    response::{Json, Response},
};
use serde_json::{json, Value};

use crate::api::{serve_feed, PageParams};
use crate::app_state::AppState;
use crate::core::FeedScope;
use crate::error::AppResult;
use crate::infrastructure::middleware::{AuthenticatedViewer, Vc};
use crate::services::{GroupFeed, ProfileFeed};

/// Global feed. Served from the page cache; new posts show up once the entry expires.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Response> {
    let page = params.request();
    serve_feed(&state, FeedScope::Global, page, async {
        let feed = state.feeds.global(page).await?;
        Ok(json!({ "page": feed }))
    })
    .await
}

pub async fn group_all(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let groups = state.posts.list_groups().await?;
    Ok(Json(json!({ "groups": groups })))
}

pub async fn group_posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<GroupFeed>> {
    let feed = state.feeds.group(&slug, params.request()).await?;
    Ok(Json(feed))
}

pub async fn profile(
    State(state): State<AppState>,
    vc: Vc,
    Path(username): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<ProfileFeed>> {
    let feed = state.feeds.profile(&vc, &username, params.request()).await?;
    Ok(Json(feed))
}

pub async fn follow_index(
    State(state): State<AppState>,
    viewer: AuthenticatedViewer,
    Query(params): Query<PageParams>,
) -> AppResult<Response> {
    let page = params.request();
    let scope = FeedScope::Followed(viewer.user.id);
    serve_feed(&state, scope, page, async {
        let feed = state.feeds.followed(&viewer.vc, page).await?;
        Ok(json!({ "page": feed }))
    })
    .await
}
