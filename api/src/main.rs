//! Product Catalog API Server
//!
//! Manages a catalog of products with prices and stock levels.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use sea_orm::{ConnectOptions, Database};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{ensure_schema, PostgresProductRepository};
use app::ProductService;
use config::Config;
use domain::ports::ProductRepository;

/// Application state shared across all handlers
pub struct AppState<PR: ProductRepository> {
    pub product_service: Arc<ProductService<PR>>,
}

impl<PR: ProductRepository> AppState<PR> {
    pub fn new(product_service: Arc<ProductService<PR>>) -> Self {
        Self { product_service }
    }
}

// Derived Clone would require `PR: Clone`
impl<PR: ProductRepository> Clone for AppState<PR> {
    fn clone(&self) -> Self {
        Self {
            product_service: self.product_service.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,catalog_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Product Catalog API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.db_max_connections)
        .max_lifetime(config.db_max_lifetime)
        .sqlx_logging(config.db_sql_logging);
    let db = Database::connect(options)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    if config.auto_migrate {
        ensure_schema(&db)
            .await
            .context("Failed to create database schema")?;
        tracing::info!("Schema ready");
    }

    // Wire adapters into services
    let product_repo = Arc::new(PostgresProductRepository::new(db));
    let product_service = Arc::new(ProductService::new(product_repo));
    let app = handlers::router(AppState::new(product_service));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
