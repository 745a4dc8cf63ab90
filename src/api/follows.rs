use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::debug;

use crate::api::profile_url;
use crate::app_state::AppState;
use crate::error::AppResult;
use crate::infrastructure::middleware::AuthenticatedViewer;

pub async fn profile_follow(
    State(state): State<AppState>,
    viewer: AuthenticatedViewer,
    Path(username): Path<String>,
) -> AppResult<Redirect> {
    let author = state.follows.find_user(&username).await?;
    let outcome = state.follows.follow(viewer.user.id, author.id).await?;
    debug!("follow {} -> {}: {:?}", viewer.user.username, username, outcome);
    Ok(Redirect::to(&profile_url(&username)))
}

pub async fn profile_unfollow(
    State(state): State<AppState>,
    viewer: AuthenticatedViewer,
    Path(username): Path<String>,
) -> AppResult<Redirect> {
    let author = state.follows.find_user(&username).await?;
    state.follows.unfollow(viewer.user.id, author.id).await?;
    Ok(Redirect::to(&profile_url(&username)))
}
