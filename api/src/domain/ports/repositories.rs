//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::entities::{Product, ProductId};
use crate::error::DomainError;

/// Page size used when the caller does not ask for one
pub const DEFAULT_PAGE_LIMIT: u64 = 100;

/// Largest page a caller may ask for
pub const MAX_PAGE_LIMIT: u64 = 1000;

/// Largest offset a caller may ask for; the database binds offsets as signed 64-bit
pub const MAX_PAGE_SKIP: u64 = i64::MAX as u64;

/// Offset pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_LIMIT
}

impl PageRequest {
    pub fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }

    /// Whether both bounds fit within `MAX_PAGE_SKIP` and `MAX_PAGE_LIMIT`
    pub fn is_within_bounds(&self) -> bool {
        self.skip <= MAX_PAGE_SKIP && self.limit <= MAX_PAGE_LIMIT
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_LIMIT)
    }
}

/// Repository for Product entities
///
/// Adapters perform no business validation: every product handed to `save`
/// has already been checked by the entity.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert the product if its id is unknown, otherwise update all mutable fields.
    /// Returns the product as stored.
    async fn save(&self, product: &Product) -> Result<Product, DomainError>;

    /// Find a product by ID
    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError>;

    /// List products in a stable order
    async fn get_all(&self, page: PageRequest) -> Result<Vec<Product>, DomainError>;

    /// Delete a product. Returns false if no such product existed.
    async fn delete(&self, id: &ProductId) -> Result<bool, DomainError>;

    /// Check whether a product exists
    async fn exists(&self, id: &ProductId) -> Result<bool, DomainError>;
}
