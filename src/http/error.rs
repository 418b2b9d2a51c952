use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::error::{AuthError, CartError, OrderError, ProductError};

/// Boundary error taxonomy. Domain errors are translated into exactly one of
/// these, and each variant maps to exactly one HTTP status.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Unauthenticated(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// The frontend treats stock/cart conflicts as 400, not 409.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidArgument(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        let body = Json(json!({ "success": false, "message": self.to_string() }));
        (status, body).into_response()
    }
}

/// `Json` extractor that reports body rejections (malformed JSON, wrong-typed
/// fields) in the API's error envelope instead of axum's plain-text default.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::InvalidArgument(rejection.body_text()))?;
        Ok(Self(value))
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::InvalidPaymentMethod(_) => ApiError::InvalidArgument("Invalid payment method".to_string()),
            OrderError::EmptyCart => ApiError::Conflict("Cart is empty".to_string()),
            OrderError::InsufficientStock(product_id) => {
                ApiError::Conflict(format!("Insufficient stock for {}", product_id))
            }
            OrderError::ActorCommunicationError(msg) => {
                ApiError::Internal(format!("Failed to place order: {}", msg))
            }
        }
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::ProductNotFound(_) => ApiError::NotFound("Product not found".to_string()),
            CartError::ActorCommunicationError(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => ApiError::NotFound("Product not found".to_string()),
            ProductError::InsufficientStock { product_id, .. } => {
                ApiError::Conflict(format!("Insufficient stock for {}", product_id))
            }
            ProductError::ValidationError(msg) => ApiError::InvalidArgument(msg),
            ProductError::ActorCommunicationError(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken | AuthError::InvalidToken => ApiError::Unauthenticated(err.to_string()),
            AuthError::Forbidden(msg) => ApiError::Forbidden(msg),
            AuthError::ActorCommunicationError(msg) => ApiError::Internal(msg),
        }
    }
}
