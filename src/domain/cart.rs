use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Unit;

/// One product in one customer's cart, unique per `(user_id, product_id)`.
///
/// A first "add" creates the line with quantity 1; a repeat add increments it.
/// The line is deleted on explicit removal or on successful checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub user_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

/// Cart line joined with its product, the shape `GET /cart` returns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub unit: Unit,
    pub quantity: u32,
}
