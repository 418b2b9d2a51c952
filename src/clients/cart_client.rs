use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};

use crate::cart_actor::CartRequest;
use crate::domain::{CartItemView, CartLine};
use crate::error::CartError;

use super::CatalogClient;

macro_rules! cart_request {
    ($self:ident, $variant:ident { $($field:ident),* }) => {{
        let (respond_to, response) = oneshot::channel();
        $self
            .sender
            .send(CartRequest::$variant { $($field,)* respond_to })
            .await
            .map_err(|_| CartError::ActorCommunicationError("Actor closed".to_string()))?;
        response
            .await
            .map_err(|_| CartError::ActorCommunicationError("Actor dropped".to_string()))?
    }};
}

/// Thin wrapper over the cart actor's channel: the raw store operations.
#[derive(Clone)]
pub struct CartStoreClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartStoreClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn add(&self, user_id: String, product_id: String) -> Result<CartLine, CartError> {
        debug!("Sending request");
        cart_request!(self, Add { user_id, product_id })
    }

    #[instrument(skip(self))]
    pub async fn lines_for(&self, user_id: String) -> Result<Vec<CartLine>, CartError> {
        debug!("Sending request");
        cart_request!(self, Lines { user_id })
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, user_id: String, product_id: String) -> Result<(), CartError> {
        debug!("Sending request");
        cart_request!(self, Remove { user_id, product_id })
    }

    #[instrument(skip(self))]
    pub async fn clear(&self, user_id: String) -> Result<(), CartError> {
        debug!("Sending request");
        cart_request!(self, Clear { user_id })
    }
}

/// Cart operations as the API exposes them: adds are validated against the
/// catalog and the cart view is joined with product details.
#[derive(Clone)]
pub struct CartClient {
    store: CartStoreClient,
    catalog: CatalogClient,
}

impl CartClient {
    pub fn new(store: CartStoreClient, catalog: CatalogClient) -> Self {
        Self { store, catalog }
    }

    /// Upsert a product into the user's cart after confirming it still exists.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, user_id: String, product_id: String) -> Result<CartLine, CartError> {
        let product = self
            .catalog
            .get_product(product_id.clone())
            .await
            .map_err(|e| CartError::ActorCommunicationError(e.to_string()))?;
        if product.is_none() {
            return Err(CartError::ProductNotFound(product_id));
        }

        let line = self.store.add(user_id, product_id).await?;
        info!(quantity = line.quantity, "Added to cart");
        Ok(line)
    }

    pub async fn lines_for(&self, user_id: String) -> Result<Vec<CartLine>, CartError> {
        self.store.lines_for(user_id).await
    }

    pub async fn remove(&self, user_id: String, product_id: String) -> Result<(), CartError> {
        self.store.remove(user_id, product_id).await
    }

    pub async fn clear(&self, user_id: String) -> Result<(), CartError> {
        self.store.clear(user_id).await
    }

    /// Lines joined with their product snapshot, the `GET /cart` shape. Lines
    /// whose product has been delisted since they were added are skipped.
    #[instrument(skip(self))]
    pub async fn cart_view(&self, user_id: String) -> Result<Vec<CartItemView>, CartError> {
        let lines = self.store.lines_for(user_id).await?;
        let mut view = Vec::with_capacity(lines.len());
        for line in lines {
            let product = self
                .catalog
                .get_product(line.product_id.clone())
                .await
                .map_err(|e| CartError::ActorCommunicationError(e.to_string()))?;
            if let Some(product) = product {
                view.push(CartItemView {
                    product_id: product.id,
                    name: product.name,
                    price: product.price,
                    image: product.image,
                    unit: product.unit,
                    quantity: line.quantity,
                });
            }
        }
        Ok(view)
    }
}
