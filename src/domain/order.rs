use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cod,
    Upi,
}

impl PaymentMethod {
    /// Parse the wire value. Anything outside `cod`/`upi` is rejected before
    /// any store is touched.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cod" => Some(PaymentMethod::Cod),
            "upi" => Some(PaymentMethod::Upi),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
}

/// Point-in-time snapshot of one ordered product. Name and price are copied at
/// order creation and stay fixed even if the catalog entry changes later.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub product_name: String,
    pub price: f64,
    pub quantity: u32,
    pub farmer_id: String,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A completed purchase. Created once by checkout; immutable afterwards except
/// for status transitions driven by fulfillment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for persisting a new order. The total is derived from the item
/// snapshots when the entity is built, never supplied by the caller.
#[derive(Debug)]
pub struct OrderCreate {
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub payment_method: PaymentMethod,
}

/// Fulfillment-side status transition, the only mutation an order accepts.
#[derive(Debug)]
pub struct OrderPatch {
    pub status: OrderStatus,
}

/// What `place_order` hands back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    pub order_id: String,
    pub total_amount: f64,
}
