//! Service-level endpoints: banner, health check and the fallback route.

use axum::{http::Uri, Json};
use serde::Serialize;

use crate::error::AppError;

#[derive(Serialize)]
pub struct RootResponse {
    message: &'static str,
    version: &'static str,
    docs: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Product Catalog API",
        version: env!("CARGO_PKG_VERSION"),
        docs: "/api/products",
    })
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Any route that matched nothing
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
