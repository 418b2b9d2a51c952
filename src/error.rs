use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        requested: u32,
        available: u32,
    },
    #[error("Product validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Invalid payment method: {0:?}")]
    InvalidPaymentMethod(String),
    #[error("Insufficient stock for {0}")]
    InsufficientStock(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Access denied. No valid token provided.")]
    MissingToken,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("{0}")]
    Forbidden(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
