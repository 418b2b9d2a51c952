use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;

use crate::domain::AuthUser;

use super::error::{ApiError, ApiJson};
use super::AppState;

/// `GET /orders` — the caller's orders, newest first.
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let orders = state.orders.orders_for(user.id).await?;
    Ok(Json(json!({ "success": true, "orders": orders })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderForm {
    pub payment_method: Option<String>,
}

/// `POST /orders` — the checkout endpoint.
pub async fn place_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(form): ApiJson<PlaceOrderForm>,
) -> Result<Json<serde_json::Value>, ApiError> {
    // A missing method fails payment validation the same way an unknown one
    // does, before any store is touched.
    let payment_method = form.payment_method.unwrap_or_default();
    let receipt = state.orders.place_order(user.id, &payment_method).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Order placed successfully",
        "orderId": receipt.order_id,
        "totalAmount": receipt.total_amount,
    })))
}
