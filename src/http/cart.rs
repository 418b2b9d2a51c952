use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{AuthUser, CartItemView};

use super::error::{ApiError, ApiJson};
use super::AppState;

/// `GET /cart` — the caller's lines joined with product details.
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<CartItemView>>, ApiError> {
    let view = state.cart.cart_view(user.id).await?;
    Ok(Json(view))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartForm {
    pub product_id: Option<String>,
}

/// `POST /cart/add` — atomic upsert: first add creates the line, repeat adds
/// increment it.
pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(form): ApiJson<AddToCartForm>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let product_id = form
        .product_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::InvalidArgument("Product ID required".to_string()))?;

    state.cart.add_to_cart(user.id, product_id).await?;
    Ok(Json(json!({ "success": true, "message": "Added to cart" })))
}

/// `DELETE /cart/{product_id}`. Removing an absent line still succeeds, so the
/// frontend can fire deletes without refetching first.
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(product_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.cart.remove(user.id, product_id).await?;
    Ok(Json(json!({ "success": true, "message": "Removed from cart" })))
}
