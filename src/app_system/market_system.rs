use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::actor_framework::ResourceActor;
use crate::cart_actor::CartService;
use crate::clients::{CartClient, CartStoreClient, CatalogClient, OrderClient, SessionClient};
use crate::domain::{Order, Product, Session};

const CHANNEL_BUFFER: usize = 32;

/// The whole marketplace backend: one actor per store, wired together behind
/// cloneable clients.
///
/// Responsible for starting the actors, composing the clients, and shutting
/// everything down by closing the channels and awaiting the actor tasks.
pub struct MarketSystem {
    pub catalog_client: CatalogClient,
    pub cart_client: CartClient,
    pub order_client: OrderClient,
    pub session_client: SessionClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

fn counter_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || {
        let id = counter.fetch_add(1, Ordering::SeqCst);
        format!("{}_{}", prefix, id)
    }
}

impl MarketSystem {
    pub fn new() -> Self {
        // 1. Catalog store
        let (catalog_actor, catalog_resource_client) =
            ResourceActor::<Product>::new(CHANNEL_BUFFER, counter_ids("product"));
        let catalog_client = CatalogClient::new(catalog_resource_client);
        let catalog_handle = tokio::spawn(catalog_actor.run());

        // 2. Cart store (bespoke actor, composite key)
        let (cart_service, cart_sender) = CartService::new(CHANNEL_BUFFER);
        let cart_client = CartClient::new(CartStoreClient::new(cart_sender), catalog_client.clone());
        let cart_handle = tokio::spawn(cart_service.run());

        // 3. Order store; its client orchestrates checkout across the others
        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new(CHANNEL_BUFFER, counter_ids("order"));
        let order_client =
            OrderClient::new(order_resource_client, cart_client.clone(), catalog_client.clone());
        let order_handle = tokio::spawn(order_actor.run());

        // 4. Session store; opaque random tokens as ids
        let (session_actor, session_resource_client) =
            ResourceActor::<Session>::new(CHANNEL_BUFFER, || Uuid::new_v4().simple().to_string());
        let session_client = SessionClient::new(session_resource_client);
        let session_handle = tokio::spawn(session_actor.run());

        Self {
            catalog_client,
            cart_client,
            order_client,
            session_client,
            handles: vec![catalog_handle, cart_handle, order_handle, session_handle],
        }
    }

    /// Drop every client so the actor channels close, then wait for the actor
    /// tasks to drain and exit.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.order_client);
        drop(self.cart_client);
        drop(self.catalog_client);
        drop(self.session_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for MarketSystem {
    fn default() -> Self {
        Self::new()
    }
}
