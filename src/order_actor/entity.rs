use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderPatch, OrderStatus};

impl Entity for Order {
    type Id = String;
    type CreatePayload = OrderCreate;
    type Patch = OrderPatch;
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &String {
        &self.id
    }

    /// The total is derived from the item snapshots here, which keeps
    /// `total_amount == Σ price × quantity` true by construction.
    fn from_create(id: String, payload: OrderCreate) -> Result<Self, String> {
        if payload.items.is_empty() {
            return Err("Order must contain at least one item".to_string());
        }
        let total_amount = payload.items.iter().map(|item| item.line_total()).sum();
        Ok(Self {
            id,
            user_id: payload.user_id,
            items: payload.items,
            total_amount,
            payment_method: payload.payment_method,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        })
    }

    /// Orders are immutable except for fulfillment status transitions.
    fn on_update(&mut self, patch: OrderPatch) -> Result<(), String> {
        self.status = patch.status;
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
