use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{AuthUser, Category, Product, ProductCreate, Unit};

use super::error::{ApiError, ApiJson};
use super::AppState;

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
}

/// `GET /products` — public catalog listing, newest first.
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.catalog.find_all(query.category).await?;
    Ok(Json(products))
}

/// All fields are optional at the wire level so a missing one yields the 400
/// the frontend expects instead of a deserialization reject.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<u32>,
    pub unit: Option<Unit>,
    pub category: Option<Category>,
    pub image: Option<String>,
}

/// `POST /products` — farmer-only (enforced by the access gate policy table).
pub async fn create_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(form): ApiJson<ProductForm>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(name), Some(price), Some(quantity), Some(unit), Some(category), Some(image)) =
        (form.name, form.price, form.quantity, form.unit, form.category, form.image)
    else {
        return Err(ApiError::InvalidArgument("All fields required".to_string()));
    };

    let product = state
        .catalog
        .create_product(ProductCreate { name, price, quantity, unit, category, image, farmer_id: user.id })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Product added", "product": product })),
    ))
}

/// `DELETE /products/{id}` — owner only.
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let product = state
        .catalog
        .get_product(id.clone())
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    if product.farmer_id != user.id {
        return Err(ApiError::Forbidden("Not authorized".to_string()));
    }

    state.catalog.delete_product(id).await?;
    Ok(Json(json!({ "success": true, "message": "Product deleted" })))
}
