//! HTTP boundary: router, handlers, access gate, and error translation.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Method;
use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::app_system::MarketSystem;
use crate::clients::{CartClient, CatalogClient, OrderClient, SessionClient};

pub mod auth;
pub mod cart;
pub mod error;
pub mod orders;
pub mod products;

/// Per-request view of the system: cloneable clients only, no shared mutable
/// state. All state lives behind the store actors.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogClient,
    pub cart: CartClient,
    pub orders: OrderClient,
    pub sessions: SessionClient,
}

impl AppState {
    pub fn new(system: &MarketSystem) -> Self {
        Self {
            catalog: system.catalog_client.clone(),
            cart: system.cart_client.clone(),
            orders: system.order_client.clone(),
            sessions: system.session_client.clone(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    // The browser frontend is served from a different origin; bearer tokens
    // ride in a header, so no credentialed CORS is needed.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/products", get(products::list_products).post(products::create_product))
        .route("/products/{id}", delete(products::delete_product))
        .route("/cart", get(cart::get_cart))
        .route("/cart/add", post(cart::add_to_cart))
        .route("/cart/{product_id}", delete(cart::remove_from_cart))
        .route("/orders", get(orders::list_orders).post(orders::place_order))
        .layer(middleware::from_fn_with_state(state.clone(), auth::access_gate))
        .layer(cors)
        .with_state(state)
}
