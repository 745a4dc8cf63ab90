// ViewerContext middleware - resolves the authenticated username set by the
// upstream session layer and injects a request-scoped ViewerContext

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::AppResult;
use crate::infrastructure::traits::UserRepository;
use crate::infrastructure::viewer::ViewerContext;

pub async fn viewer_context_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let request_id = format!("req-{}", Uuid::new_v4());
    let username = username_from_headers(request.headers(), &state.config.auth.user_header);

    let viewer_context = match username {
        Some(username) => match state.store.find_user_by_username(&username).await? {
            Some(user) => ViewerContext::authenticated(user, request_id),
            None => {
                // Session refers to an account this store does not know.
                warn!("Unknown authenticated user {}, treating as anonymous", username);
                ViewerContext::anonymous(request_id)
            }
        },
        None => ViewerContext::anonymous(request_id),
    };

    request.extensions_mut().insert(Arc::new(viewer_context));
    Ok(next.run(request).await)
}

/// Extract the authenticated username from the configured header.
fn username_from_headers(headers: &HeaderMap, header_name: &str) -> Option<String> {
    headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|username| !username.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const HEADER: &str = "x-authenticated-user";

    #[test]
    fn test_username_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER, HeaderValue::from_static(" alice "));
        assert_eq!(username_from_headers(&headers, HEADER), Some("alice".to_string()));
    }

    #[test]
    fn test_missing_or_blank_header_is_anonymous() {
        let mut headers = HeaderMap::new();
        assert_eq!(username_from_headers(&headers, HEADER), None);

        headers.insert(HEADER, HeaderValue::from_static("   "));
        assert_eq!(username_from_headers(&headers, HEADER), None);
    }

    #[test]
    fn test_other_headers_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer token123"));
        assert_eq!(username_from_headers(&headers, HEADER), None);
    }
}
