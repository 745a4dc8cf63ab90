use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

pub async fn page_not_found(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Page not found",
            "path": uri.path(),
            "status": StatusCode::NOT_FOUND.as_u16()
        })),
    )
        .into_response()
}

pub async fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Internal server error",
            "status": StatusCode::INTERNAL_SERVER_ERROR.as_u16()
        })),
    )
        .into_response()
}
