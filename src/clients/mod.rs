pub mod cart_client;
pub mod catalog_client;
pub mod order_client;
pub mod session_client;

pub use cart_client::{CartClient, CartStoreClient};
pub use catalog_client::CatalogClient;
pub use order_client::OrderClient;
pub use session_client::SessionClient;
