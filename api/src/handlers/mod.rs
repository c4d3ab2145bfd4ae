//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod products;
pub mod system;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::ports::ProductRepository;
use crate::AppState;

pub use products::{
    create_product, decrease_stock, delete_product, get_product, increase_stock, list_products,
    update_product,
};
pub use system::{health, not_found, root};

/// Build the application router
pub fn router<PR>(state: AppState<PR>) -> Router
where
    PR: ProductRepository + 'static,
{
    let products = Router::new()
        .route(
            "/products",
            get(list_products::<PR>).post(create_product::<PR>),
        )
        .route(
            "/products/:id",
            get(get_product::<PR>)
                .put(update_product::<PR>)
                .delete(delete_product::<PR>),
        )
        .route(
            "/products/:id/stock/increase",
            post(increase_stock::<PR>),
        )
        .route(
            "/products/:id/stock/decrease",
            post(decrease_stock::<PR>),
        );

    Router::new()
        // Service banner and health check
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api", products)
        .fallback(not_found)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
