//! Product handlers
//!
//! Endpoints for the product catalog. Handlers only check the request shape
//! (field lengths, price precision, page bounds) and translate between JSON and
//! the service; every business rule lives in the entity.
//!
//! Prices are exchanged as JSON strings ("19.99") so no digit passes through a
//! binary float.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::entities::{
    NewProduct, Product, ProductId, ProductUpdate, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH,
    MAX_PRICE_INTEGER_DIGITS, MAX_PRICE_SCALE,
};
use crate::domain::ports::{PageRequest, ProductRepository, MAX_PAGE_LIMIT, MAX_PAGE_SKIP};
use crate::error::AppError;
use crate::AppState;

/// Request body for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub stock_quantity: i32,
}

/// Request body for a partial product update
///
/// Omitted fields are left untouched. `description: null` clears the description.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
}

/// Request body for stock adjustments
#[derive(Debug, Deserialize)]
pub struct UpdateStockRequest {
    pub quantity: i32,
}

/// Product as returned by the API
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub in_stock: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        ProductResponse {
            id: p.id().to_string(),
            name: p.name().to_string(),
            description: p.description().map(str::to_string),
            price: p.price(),
            stock_quantity: p.stock_quantity(),
            in_stock: p.has_stock(),
            created_at: p.created_at().to_rfc3339(),
            updated_at: p.updated_at().to_rfc3339(),
        }
    }
}

/// Marks a field as supplied, so that an explicit `null` becomes `Some(None)`
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn check_name_length(name: &str) -> Result<(), AppError> {
    if name.trim().chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Name must be at most {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

fn check_description_length(description: Option<&str>) -> Result<(), AppError> {
    if description.is_some_and(|d| d.trim().chars().count() > MAX_DESCRIPTION_LENGTH) {
        return Err(AppError::BadRequest(format!(
            "Description must be at most {} characters",
            MAX_DESCRIPTION_LENGTH
        )));
    }
    Ok(())
}

/// Reject prices the `NUMERIC(10, 2)` column would round or overflow
fn check_price(price: Decimal) -> Result<(), AppError> {
    if price.normalize().scale() > MAX_PRICE_SCALE {
        return Err(AppError::BadRequest(format!(
            "Price must have at most {} decimal places",
            MAX_PRICE_SCALE
        )));
    }
    if price.abs() >= Decimal::from(10u64.pow(MAX_PRICE_INTEGER_DIGITS)) {
        return Err(AppError::BadRequest(format!(
            "Price must have at most {} integer digits",
            MAX_PRICE_INTEGER_DIGITS
        )));
    }
    Ok(())
}

fn check_page(page: &PageRequest) -> Result<(), AppError> {
    if !page.is_within_bounds() {
        return Err(AppError::BadRequest(format!(
            "limit must be at most {} and skip at most {}",
            MAX_PAGE_LIMIT, MAX_PAGE_SKIP
        )));
    }
    Ok(())
}

/// POST /api/products
///
/// Create a new product.
pub async fn create_product<PR: ProductRepository + 'static>(
    State(state): State<AppState<PR>>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    check_name_length(&request.name)?;
    check_description_length(request.description.as_deref())?;
    check_price(request.price)?;

    let product = state
        .product_service
        .create_product(NewProduct {
            name: request.name,
            description: request.description,
            price: request.price,
            stock_quantity: request.stock_quantity,
            id: None,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(product.into())))
}

/// GET /api/products?skip=0&limit=100
///
/// List products with offset pagination.
pub async fn list_products<PR: ProductRepository + 'static>(
    State(state): State<AppState<PR>>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    check_page(&page)?;
    let products = state.product_service.list_products(page).await?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// GET /api/products/:id
pub async fn get_product<PR: ProductRepository + 'static>(
    State(state): State<AppState<PR>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state.product_service.get_product(&ProductId(id)).await?;

    Ok(Json(product.into()))
}

/// PUT /api/products/:id
///
/// Update the supplied fields of a product.
pub async fn update_product<PR: ProductRepository + 'static>(
    State(state): State<AppState<PR>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    if let Some(name) = request.name.as_deref() {
        check_name_length(name)?;
    }
    check_description_length(request.description.as_ref().and_then(|d| d.as_deref()))?;
    if let Some(price) = request.price {
        check_price(price)?;
    }

    let product = state
        .product_service
        .update_product(
            &ProductId(id),
            ProductUpdate {
                name: request.name,
                description: request.description,
                price: request.price,
                stock_quantity: request.stock_quantity,
            },
        )
        .await?;

    Ok(Json(product.into()))
}

/// POST /api/products/:id/stock/increase
pub async fn increase_stock<PR: ProductRepository + 'static>(
    State(state): State<AppState<PR>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStockRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state
        .product_service
        .increase_stock(&ProductId(id), request.quantity)
        .await?;

    Ok(Json(product.into()))
}

/// POST /api/products/:id/stock/decrease
pub async fn decrease_stock<PR: ProductRepository + 'static>(
    State(state): State<AppState<PR>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStockRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state
        .product_service
        .decrease_stock(&ProductId(id), request.quantity)
        .await?;

    Ok(Json(product.into()))
}

/// DELETE /api/products/:id
pub async fn delete_product<PR: ProductRepository + 'static>(
    State(state): State<AppState<PR>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = state.product_service.delete_product(&ProductId(id)).await?;
    if !deleted {
        tracing::warn!(product_id = %id, "Product vanished between existence check and delete");
    }

    Ok(StatusCode::NO_CONTENT)
}
