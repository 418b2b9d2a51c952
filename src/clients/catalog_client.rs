use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::catalog_actor::{StockAction, StockActionResult};
use crate::domain::{Product, ProductCreate, ProductPatch};
use crate::error::ProductError;

/// Client for the catalog store.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<Product>,
}

/// The store reports failures as strings; a miss carries the actor's
/// "Item not found" message, anything else is a dead channel.
fn store_error(id: String, e: String) -> ProductError {
    if e.starts_with("Item not found") {
        ProductError::NotFound(id)
    } else {
        ProductError::ActorCommunicationError(e)
    }
}

impl CatalogClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: String) -> Result<Option<Product>, ProductError> {
        debug!("Sending request");
        self.inner.get(id).await.map_err(ProductError::ActorCommunicationError)
    }

    /// Create a listing and hand back the stored product.
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn create_product(&self, payload: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        let id = self.inner.create(payload).await.map_err(ProductError::ValidationError)?;
        self.inner
            .get(id.clone())
            .await
            .map_err(ProductError::ActorCommunicationError)?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn update_product(&self, id: String, patch: ProductPatch) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(ProductError::ValidationError)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: String) -> Result<(), ProductError> {
        debug!("Sending request");
        self.inner.delete(id.clone()).await.map_err(|e| store_error(id, e))
    }

    /// Full catalog listing, newest first, optionally filtered by category.
    /// An unknown category matches nothing rather than erroring, which is what
    /// an equality filter over a document store does.
    #[instrument(skip(self))]
    pub async fn find_all(&self, category: Option<String>) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let mut products = self
            .inner
            .query(move |product: &Product| match &category {
                Some(wanted) => product.category.as_str() == wanted,
                None => true,
            })
            .await
            .map_err(ProductError::ActorCommunicationError)?;
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn find_by_farmer(&self, farmer_id: String) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let mut products = self
            .inner
            .query(move |product: &Product| product.farmer_id == farmer_id)
            .await
            .map_err(ProductError::ActorCommunicationError)?;
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id.clone(), StockAction::Check).await {
            Ok(StockActionResult::Level(level)) => Ok(level),
            Ok(other) => Err(ProductError::ActorCommunicationError(format!(
                "Unexpected stock result: {:?}",
                other
            ))),
            Err(e) => Err(store_error(id, e)),
        }
    }

    /// Check-and-decrement in one actor message. A concurrent checkout cannot
    /// slip between the check and the decrement.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: String, quantity: u32) -> Result<(), ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id.clone(), StockAction::Reserve(quantity)).await {
            Ok(StockActionResult::Reserved) => Ok(()),
            Ok(StockActionResult::Insufficient { available }) => Err(ProductError::InsufficientStock {
                product_id: id,
                requested: quantity,
                available,
            }),
            Ok(other) => Err(ProductError::ActorCommunicationError(format!(
                "Unexpected stock result: {:?}",
                other
            ))),
            Err(e) => Err(store_error(id, e)),
        }
    }

    /// Compensating add-back for a reservation that could not be completed.
    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: String, quantity: u32) -> Result<(), ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id.clone(), StockAction::Release(quantity)).await {
            Ok(StockActionResult::Released) => Ok(()),
            Ok(other) => Err(ProductError::ActorCommunicationError(format!(
                "Unexpected stock result: {:?}",
                other
            ))),
            Err(e) => Err(store_error(id, e)),
        }
    }
}
