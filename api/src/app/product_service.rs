//! Product service
//!
//! Use cases for the product catalog. Every operation follows the same shape:
//! fetch if needed, let the entity validate and mutate, persist once, return
//! the stored result. Errors from the entity and from the repository are
//! returned to the caller as they are.
//!
//! Fetch and persist are separate repository calls, so concurrent writers to
//! the same product follow last-write-wins.

use std::sync::Arc;

use crate::domain::entities::{NewProduct, Product, ProductId, ProductUpdate};
use crate::domain::ports::{PageRequest, ProductRepository};
use crate::error::DomainError;

/// Service for managing the product catalog
pub struct ProductService<PR>
where
    PR: ProductRepository,
{
    products: Arc<PR>,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository,
{
    pub fn new(products: Arc<PR>) -> Self {
        Self { products }
    }

    /// Create and persist a new product
    pub async fn create_product(&self, new: NewProduct) -> Result<Product, DomainError> {
        let product = Product::create(new)?;
        let saved = self.products.save(&product).await?;

        tracing::info!(
            product_id = %saved.id(),
            stock_quantity = saved.stock_quantity(),
            "Product created"
        );

        Ok(saved)
    }

    /// Get a product, failing with `NotFound` if it does not exist
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, DomainError> {
        self.products
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn list_products(&self, page: PageRequest) -> Result<Vec<Product>, DomainError> {
        self.products.get_all(page).await
    }

    /// Apply the supplied fields in order name, description, price, stock.
    ///
    /// Nothing is persisted unless every field is accepted.
    pub async fn update_product(
        &self,
        id: &ProductId,
        update: ProductUpdate,
    ) -> Result<Product, DomainError> {
        let mut product = self.get_product(id).await?;

        if let Some(name) = update.name.as_deref() {
            product.rename(name)?;
        }
        if let Some(description) = update.description.as_ref() {
            product.redescribe(description.as_deref());
        }
        if let Some(price) = update.price {
            product.reprice(price)?;
        }
        if let Some(quantity) = update.stock_quantity {
            product.set_stock(quantity)?;
        }

        let saved = self.products.save(&product).await?;
        tracing::info!(product_id = %id, "Product updated");
        Ok(saved)
    }

    pub async fn increase_stock(&self, id: &ProductId, amount: i32) -> Result<Product, DomainError> {
        let mut product = self.get_product(id).await?;
        product.increase_stock(amount)?;

        let saved = self.products.save(&product).await?;
        tracing::info!(
            product_id = %id,
            amount = amount,
            stock_quantity = saved.stock_quantity(),
            "Stock increased"
        );
        Ok(saved)
    }

    pub async fn decrease_stock(&self, id: &ProductId, amount: i32) -> Result<Product, DomainError> {
        let mut product = self.get_product(id).await?;
        product.decrease_stock(amount)?;

        let saved = self.products.save(&product).await?;
        tracing::info!(
            product_id = %id,
            amount = amount,
            stock_quantity = saved.stock_quantity(),
            "Stock decreased"
        );
        Ok(saved)
    }

    /// Delete a product, failing with `NotFound` if it does not exist.
    ///
    /// The existence check and the delete are two calls; a concurrent delete in
    /// between is not detected.
    pub async fn delete_product(&self, id: &ProductId) -> Result<bool, DomainError> {
        if !self.products.exists(id).await? {
            return Err(not_found(id));
        }

        let deleted = self.products.delete(id).await?;
        tracing::info!(product_id = %id, deleted = deleted, "Product deleted");
        Ok(deleted)
    }
}

fn not_found(id: &ProductId) -> DomainError {
    DomainError::NotFound(format!("Product with ID {} not found", id))
}
