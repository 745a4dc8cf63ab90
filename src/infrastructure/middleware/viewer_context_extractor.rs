// ViewerContext extractors for handlers

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::app_state::AppState;
use crate::infrastructure::viewer::ViewerContext;
use crate::models::User;

/// Request-scoped viewer, anonymous or not.
///
/// Derefs to [`ViewerContext`], so handlers read `vc.user_id()` directly.
#[derive(Debug, Clone)]
pub struct Vc(Arc<ViewerContext>);

impl std::ops::Deref for Vc {
    type Target = ViewerContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Vc
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Arc<ViewerContext>>()
            .map(|vc| Vc(vc.clone()))
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// A viewer that must be logged in. Anonymous requests are redirected to the
/// login page with `next` pointing back at the requested path.
#[derive(Debug, Clone)]
pub struct AuthenticatedViewer {
    pub user: User,
    pub vc: Vc,
}

impl FromRequestParts<AppState> for AuthenticatedViewer {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let vc = Vc::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match vc.user.clone() {
            Some(user) => Ok(Self { user, vc }),
            None => {
                let next = parts
                    .uri
                    .path_and_query()
                    .map(|path| path.as_str())
                    .unwrap_or_else(|| parts.uri.path());
                Err(login_redirect(&state.config.auth.login_url, next))
            }
        }
    }
}

/// Redirect to the login page. `next` is the full requested path with its
/// query string, percent-encoded except for `/`.
pub fn login_redirect(login_url: &str, next: &str) -> Response {
    let next = urlencoding::encode(next).replace("%2F", "/");
    Redirect::to(&format!("{}?next={}", login_url, next)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, Request};

    #[tokio::test]
    async fn test_vc_reads_extension() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        parts
            .extensions
            .insert(Arc::new(ViewerContext::anonymous("test-request".to_string())));

        let vc = Vc::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(vc.request_id, "test-request");
        assert!(vc.user.is_none());
    }

    #[tokio::test]
    async fn test_vc_without_middleware_is_server_error() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        let rejection = Vc::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(rejection, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_login_redirect_carries_next() {
        let response = login_redirect("/auth/login/", "/new/");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/auth/login/?next=/new/"
        );
    }

    #[test]
    fn test_login_redirect_encodes_query_and_reserved_characters() {
        let response = login_redirect("/auth/login/", "/follow/?page=2");
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/auth/login/?next=/follow/%3Fpage%3D2"
        );

        let response = login_redirect("/auth/login/", "/a+b/follow/");
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/auth/login/?next=/a%2Bb/follow/"
        );
    }
}
