use chrono::Utc;

use super::actions::{StockAction, StockActionResult};
use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch};

impl Entity for Product {
    type Id = String;
    type CreatePayload = ProductCreate;
    type Patch = ProductPatch;
    type Action = StockAction;
    type ActionResult = StockActionResult;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, payload: ProductCreate) -> Result<Self, String> {
        if payload.name.trim().is_empty() {
            return Err("Product name must not be empty".to_string());
        }
        if payload.price <= 0.0 || !payload.price.is_finite() {
            return Err(format!("Product price must be positive, got {}", payload.price));
        }
        Ok(Self {
            id,
            name: payload.name,
            price: payload.price,
            quantity: payload.quantity,
            unit: payload.unit,
            category: payload.category,
            image: payload.image,
            farmer_id: payload.farmer_id,
            created_at: Utc::now(),
        })
    }

    fn on_update(&mut self, patch: ProductPatch) -> Result<(), String> {
        if let Some(price) = patch.price {
            if price <= 0.0 || !price.is_finite() {
                return Err(format!("Product price must be positive, got {}", price));
            }
            self.price = price;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: StockAction) -> Result<StockActionResult, String> {
        match action {
            StockAction::Check => Ok(StockActionResult::Level(self.quantity)),
            StockAction::Reserve(amount) => {
                if self.quantity < amount {
                    return Ok(StockActionResult::Insufficient { available: self.quantity });
                }
                self.quantity -= amount;
                Ok(StockActionResult::Reserved)
            }
            StockAction::Release(amount) => {
                self.quantity = self.quantity.saturating_add(amount);
                Ok(StockActionResult::Released)
            }
        }
    }
}
