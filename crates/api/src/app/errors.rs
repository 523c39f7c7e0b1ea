use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use shoplite_core::StoreError;
use shoplite_orders::PlaceOrderError;

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        StoreError::Unauthorized => {
            json_error(StatusCode::FORBIDDEN, "unauthorized", "unauthorized")
        }
        StoreError::Backend(msg) => {
            tracing::error!(error = %msg, "store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}

pub fn place_order_error_to_response(err: PlaceOrderError) -> axum::response::Response {
    match err {
        PlaceOrderError::EmptyCart => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "empty_cart", "cart is empty")
        }
        PlaceOrderError::CreationFailed(e) => {
            tracing::error!(error = %e, "order creation failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "order_creation_failed",
                e.to_string(),
            )
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
