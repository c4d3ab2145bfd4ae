//! PostgreSQL adapter for ProductRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder,
    QuerySelect, Set,
};

use crate::domain::entities::{Product, ProductId};
use crate::domain::ports::{PageRequest, ProductRepository, MAX_PAGE_SKIP};
use crate::entity::products;
use crate::error::DomainError;

/// PostgreSQL implementation of ProductRepository
pub struct PostgresProductRepository {
    db: DatabaseConnection,
}

impl PostgresProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn save(&self, product: &Product) -> Result<Product, DomainError> {
        // Single upsert; created_at is never overwritten
        let result = products::Entity::insert(to_active_model(product))
            .on_conflict(
                OnConflict::column(products::Column::Id)
                    .update_columns([
                        products::Column::Name,
                        products::Column::Description,
                        products::Column::Price,
                        products::Column::StockQuantity,
                        products::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let result = products::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn get_all(&self, page: PageRequest) -> Result<Vec<Product>, DomainError> {
        let results = products::Entity::find()
            .order_by_asc(products::Column::CreatedAt)
            .order_by_asc(products::Column::Id)
            .offset(page.skip.min(MAX_PAGE_SKIP))
            .limit(page.limit.min(MAX_PAGE_SKIP))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn delete(&self, id: &ProductId) -> Result<bool, DomainError> {
        let result = products::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    async fn exists(&self, id: &ProductId) -> Result<bool, DomainError> {
        let count = products::Entity::find_by_id(id.0)
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count > 0)
    }
}

fn to_active_model(product: &Product) -> products::ActiveModel {
    products::ActiveModel {
        id: Set(product.id().0),
        name: Set(product.name().to_string()),
        description: Set(product.description().map(str::to_string)),
        price: Set(product.price()),
        stock_quantity: Set(product.stock_quantity()),
        created_at: Set(product.created_at().fixed_offset()),
        updated_at: Set(product.updated_at().fixed_offset()),
    }
}

/// Convert SeaORM model to domain entity
impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Product::restore(
            ProductId(model.id),
            model.name,
            model.description,
            model.price,
            model.stock_quantity,
            model.created_at.with_timezone(&Utc),
            model.updated_at.with_timezone(&Utc),
        )
    }
}
