// HTTP interface - routes and the page-cache wrapper for feeds

pub mod error_pages;
pub mod feeds;
pub mod follows;
pub mod posts;

use axum::{
    http::header,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::core::{FeedScope, PageRequest, PostId};
use crate::error::{AppError, AppResult};
use crate::infrastructure::middleware::viewer_context_middleware;
use crate::infrastructure::FeedCacheKey;

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

impl PageParams {
    pub fn request(&self) -> PageRequest {
        PageRequest::parse(self.page.as_deref())
    }
}

pub(crate) fn render<T: Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string(value)
        .map_err(|e| AppError::Internal(format!("Failed to render page: {}", e)))
}

pub(crate) fn json_body(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Render a feed page, going through the page cache for cacheable scopes.
/// `build` is only awaited on a cache miss.
pub(crate) async fn serve_feed<T, Fut>(
    state: &AppState,
    scope: FeedScope,
    page: PageRequest,
    build: Fut,
) -> AppResult<Response>
where
    T: Serialize,
    Fut: Future<Output = AppResult<T>>,
{
    if !scope.is_cacheable() {
        return Ok(json_body(render(&build.await?)?));
    }

    let key = FeedCacheKey::new(&scope, page);
    if let Some(body) = state.page_cache.get(&key).await {
        return Ok(json_body(body));
    }

    let body = render(&build.await?)?;
    state.page_cache.insert(key, body.clone()).await;
    Ok(json_body(body))
}

pub(crate) fn parse_post_id(raw: &str) -> AppResult<PostId> {
    raw.parse::<i64>()
        .map(PostId)
        .map_err(|_| AppError::NotFound(format!("Post {} not found", raw)))
}

pub(crate) fn profile_url(username: &str) -> String {
    format!("/{}/", username)
}

pub(crate) fn post_url(username: &str, post_id: PostId) -> String {
    format!("/{}/{}/", username, post_id)
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Feeds
        .route("/", get(feeds::index))
        .route("/group/", get(feeds::group_all))
        .route("/group/{slug}/", get(feeds::group_posts))
        .route("/follow/", get(feeds::follow_index))
        // Error pages
        .route("/404/", get(error_pages::page_not_found))
        .route("/500/", get(error_pages::server_error))
        // Posts
        .route("/new/", get(posts::new_post_form).post(posts::new_post))
        .route("/{username}/", get(feeds::profile))
        .route("/{username}/{post_id}/", get(posts::post_view))
        .route(
            "/{username}/{post_id}/edit/",
            get(posts::post_edit_form).post(posts::post_edit),
        )
        .route(
            "/{username}/{post_id}/comment/",
            get(posts::comment_redirect).post(posts::add_comment),
        )
        // Follow graph
        .route(
            "/{username}/follow/",
            get(follows::profile_follow).post(follows::profile_follow),
        )
        .route(
            "/{username}/unfollow/",
            get(follows::profile_unfollow).post(follows::profile_unfollow),
        )
        .fallback(error_pages::page_not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            viewer_context_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params() {
        assert_eq!(PageParams::default().request(), PageRequest(1));
        let params = PageParams {
            page: Some("4".to_string()),
        };
        assert_eq!(params.request(), PageRequest(4));
    }

    #[test]
    fn test_urls_and_ids() {
        assert_eq!(profile_url("leo"), "/leo/");
        assert_eq!(post_url("leo", PostId(7)), "/leo/7/");
        assert_eq!(parse_post_id("12").unwrap(), PostId(12));
        assert!(matches!(parse_post_id("abc"), Err(AppError::NotFound(_))));
    }
}
