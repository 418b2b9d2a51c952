use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit of measure a product is sold in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    Grams,
    Liters,
    Ml,
    Pieces,
    Bunches,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Vegetables,
    Fruits,
    Grains,
    Dairy,
}

impl Category {
    /// Wire name of the category, as it appears in `?category=` filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vegetables => "Vegetables",
            Category::Fruits => "Fruits",
            Category::Grains => "Grains",
            Category::Dairy => "Dairy",
        }
    }
}

/// A sellable item listed by a farmer.
///
/// `quantity` is the remaining stock and never goes negative: the only
/// mutation paths are the owner's create/delete and the checkout workflow's
/// reserve action, which rejects a decrement below zero before applying it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub unit: Unit,
    pub category: Category,
    pub image: String,
    pub farmer_id: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for listing a new product.
#[derive(Debug)]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub unit: Unit,
    pub category: Category,
    pub image: String,
    pub farmer_id: String,
}

/// Owner-side edits. Stock adjustments from checkout go through stock actions
/// instead, so the check-and-decrement stays atomic.
#[derive(Debug)]
pub struct ProductPatch {
    pub price: Option<f64>,
    pub quantity: Option<u32>,
}
