//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{Product, ProductId};
use crate::domain::ports::{PageRequest, ProductRepository};
use crate::error::DomainError;

// ============================================================================
// In-Memory Product Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
    should_fail: bool,
    save_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every call fails with a database error
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Pre-populate with a product for testing
    pub fn with_product(self, product: Product) -> Self {
        self.products
            .write()
            .unwrap()
            .insert(product.id(), product);
        self
    }

    /// Number of times `save` has been called
    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    /// Number of times `delete` has been called
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.should_fail {
            Err(DomainError::Database(
                "in-memory store unavailable".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, product: &Product) -> Result<Product, DomainError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let mut products = self.products.write().unwrap();
        products.insert(product.id(), product.clone());
        Ok(product.clone())
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        self.check()?;
        let products = self.products.read().unwrap();
        Ok(products.get(id).cloned())
    }

    async fn get_all(&self, page: PageRequest) -> Result<Vec<Product>, DomainError> {
        self.check()?;
        let products = self.products.read().unwrap();

        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by_key(|p| (p.created_at(), p.id()));

        Ok(all
            .into_iter()
            .skip(page.skip as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn delete(&self, id: &ProductId) -> Result<bool, DomainError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut products = self.products.write().unwrap();
        Ok(products.remove(id).is_some())
    }

    async fn exists(&self, id: &ProductId) -> Result<bool, DomainError> {
        self.check()?;
        let products = self.products.read().unwrap();
        Ok(products.contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_product, test_product_with_stock};

    #[tokio::test]
    async fn save_inserts_then_updates() {
        let repo = InMemoryProductRepository::new();
        let mut product = test_product_with_stock(1);

        repo.save(&product).await.unwrap();
        product.set_stock(9).unwrap();
        repo.save(&product).await.unwrap();

        let stored = repo.get_by_id(&product.id()).await.unwrap().unwrap();
        assert_eq!(stored.stock_quantity(), 9);
        assert_eq!(repo.get_all(PageRequest::default()).await.unwrap().len(), 1);
        assert_eq!(repo.save_calls(), 2);
    }

    #[tokio::test]
    async fn delete_reports_whether_removed() {
        let product = test_product();
        let repo = InMemoryProductRepository::new().with_product(product.clone());

        assert!(repo.delete(&product.id()).await.unwrap());
        assert!(!repo.delete(&product.id()).await.unwrap());
        assert!(!repo.exists(&product.id()).await.unwrap());
    }

    #[tokio::test]
    async fn failing_repository_errors_on_every_call() {
        let repo = InMemoryProductRepository::failing();

        assert!(matches!(
            repo.get_by_id(&ProductId::new()).await,
            Err(DomainError::Database(_))
        ));
        assert!(matches!(
            repo.exists(&ProductId::new()).await,
            Err(DomainError::Database(_))
        ));
    }
}
