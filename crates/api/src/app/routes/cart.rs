use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use shoplite_core::{CartLineId, ProductId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::UserContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(view_cart))
        .route("/items", post(add_item))
        .route("/items/:id", post(set_quantity))
        .route("/items/:id/remove", post(remove_item))
}

pub async fn view_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
) -> axum::response::Response {
    let lines = match services.cart.list_items(user.user_id()).await {
        Ok(lines) => lines,
        Err(e) => return errors::store_error_to_response(e),
    };

    let mut items = Vec::with_capacity(lines.len());
    for line in &lines {
        let product = match services.catalog.get(line.product_id).await {
            Ok(p) => p,
            Err(e) => return errors::store_error_to_response(e),
        };
        items.push(dto::cart_line_to_json(line, product.as_ref()));
    }

    let total = match shoplite_cart::total(&services.cart, &services.catalog, user.user_id()).await
    {
        Ok(t) => t,
        Err(e) => return errors::store_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({ "items": items, "total": total })),
    )
        .into_response()
}

pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    Json(body): Json<dto::AddCartItemRequest>,
) -> axum::response::Response {
    let product_id: ProductId = match body.product_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
        }
    };

    match services.cart.add_item(user.user_id(), product_id).await {
        Ok(line) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "id": line.id.to_string(),
                "product_id": line.product_id.to_string(),
                "quantity": line.quantity,
            })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn set_quantity(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::SetQuantityRequest>,
) -> axum::response::Response {
    let line_id: CartLineId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid cart line id")
        }
    };

    match services
        .cart
        .set_quantity(user.user_id(), line_id, body.quantity)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({"id": line_id.to_string(), "quantity": body.quantity})),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn remove_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let line_id: CartLineId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid cart line id")
        }
    };

    match services.cart.remove_item(user.user_id(), line_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({"id": line_id.to_string()})),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
