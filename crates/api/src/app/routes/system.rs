use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::context::UserContext;

pub async fn health() -> axum::response::Response {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"}))).into_response()
}

pub async fn whoami(Extension(user): Extension<UserContext>) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({"user_id": user.user_id().to_string()})),
    )
        .into_response()
}
