use tracing::{error, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::domain::{Order, OrderCreate, OrderItem, OrderReceipt, PaymentMethod};
use crate::error::{OrderError, ProductError};

use super::{CartClient, CatalogClient};

/// Client for the order store, and home of the checkout workflow.
///
/// Checkout touches three stores (cart read, catalog read + decrement, order
/// write, cart clear), so this client composes the other two the same way the
/// stores themselves stay independent.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    cart: CartClient,
    catalog: CatalogClient,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, cart: CartClient, catalog: CatalogClient) -> Self {
        Self { inner, cart, catalog }
    }

    /// Convert the caller's cart into a persisted order.
    ///
    /// Sequence: validate payment method, load cart, snapshot products, reserve
    /// stock (atomic check-and-decrement per product, compensated on partial
    /// failure), persist the order, clear the cart. Stock is never left
    /// decremented without a persisted order; a cart-clear failure after the
    /// order exists is surfaced to the caller but not rolled back.
    #[instrument(skip(self))]
    pub async fn place_order(&self, user_id: String, payment_method: &str) -> Result<OrderReceipt, OrderError> {
        info!("Processing place_order request");

        // Rejected before any store is touched.
        let payment = PaymentMethod::parse(payment_method)
            .ok_or_else(|| OrderError::InvalidPaymentMethod(payment_method.to_string()))?;

        let lines = self
            .cart
            .lines_for(user_id.clone())
            .await
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?;
        if lines.is_empty() {
            info!("Cart is empty, rejecting order");
            return Err(OrderError::EmptyCart);
        }

        // Snapshot name and price per line and pre-check stock. The first
        // violation aborts the whole order with nothing mutated. A product
        // delisted since it was carted counts as out of stock.
        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            let product = self
                .catalog
                .get_product(line.product_id.clone())
                .await
                .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?
                .ok_or_else(|| OrderError::InsufficientStock(line.product_id.clone()))?;

            if product.quantity < line.quantity {
                info!(product_id = %product.id, "Insufficient stock, rejecting order");
                return Err(OrderError::InsufficientStock(product.id));
            }

            items.push(OrderItem {
                product_id: product.id,
                product_name: product.name,
                price: product.price,
                quantity: line.quantity,
                farmer_id: product.farmer_id,
            });
        }

        // Reserve per product. Each reserve is check-and-decrement inside the
        // catalog actor, so a concurrent checkout cannot race past the check.
        // If a later line fails, the earlier reservations are released so the
        // net effect of a failed checkout is zero.
        let mut reserved: Vec<(String, u32)> = Vec::new();
        for line in &lines {
            match self.catalog.reserve_stock(line.product_id.clone(), line.quantity).await {
                Ok(()) => reserved.push((line.product_id.clone(), line.quantity)),
                Err(ProductError::InsufficientStock { product_id, .. }) => {
                    warn!(%product_id, "Reservation lost to a concurrent checkout");
                    self.release_all(&reserved).await;
                    return Err(OrderError::InsufficientStock(product_id));
                }
                Err(e) => {
                    error!(error = %e, "Stock reservation failed");
                    self.release_all(&reserved).await;
                    return Err(OrderError::ActorCommunicationError(e.to_string()));
                }
            }
        }

        let total_amount: f64 = items.iter().map(OrderItem::line_total).sum();

        let payload = OrderCreate { user_id: user_id.clone(), items, payment_method: payment };
        let order_id = match self.inner.create(payload).await {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "Order persistence failed, releasing reserved stock");
                self.release_all(&reserved).await;
                return Err(OrderError::ActorCommunicationError(e));
            }
        };

        // The whole cart is cleared, not just the ordered lines. If this step
        // fails the order stays persisted; see DESIGN.md.
        if let Err(e) = self.cart.clear(user_id).await {
            error!(error = %e, %order_id, "Cart clear failed after order was persisted");
            return Err(OrderError::ActorCommunicationError(e.to_string()));
        }

        info!(%order_id, total_amount, "Order placed");
        Ok(OrderReceipt { order_id, total_amount })
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: String) -> Result<Option<Order>, OrderError> {
        self.inner.get(id).await.map_err(OrderError::ActorCommunicationError)
    }

    /// The caller's orders, newest first.
    #[instrument(skip(self))]
    pub async fn orders_for(&self, user_id: String) -> Result<Vec<Order>, OrderError> {
        let mut orders = self
            .inner
            .query(move |order: &Order| order.user_id == user_id)
            .await
            .map_err(OrderError::ActorCommunicationError)?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Best-effort compensation: give back every reservation made so far.
    async fn release_all(&self, reserved: &[(String, u32)]) {
        for (product_id, quantity) in reserved {
            if let Err(e) = self.catalog.release_stock(product_id.clone(), *quantity).await {
                error!(error = %e, %product_id, "Failed to release reserved stock");
            }
        }
    }
}
