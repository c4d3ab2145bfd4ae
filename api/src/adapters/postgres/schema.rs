//! Schema bootstrap
//!
//! Creates the tables and indexes derived from the SeaORM entities when they are
//! missing. Existing tables are left untouched.

use sea_orm::{sea_query::Index, ConnectionTrait, DatabaseConnection, DbErr, Schema};

use crate::entity::products;

pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut table = schema.create_table_from_entity(products::Entity);
    table.if_not_exists();
    db.execute(backend.build(&table)).await?;

    let index = Index::create()
        .if_not_exists()
        .name("idx_products_name")
        .table(products::Entity)
        .col(products::Column::Name)
        .to_owned();
    db.execute(backend.build(&index)).await?;

    tracing::debug!("Schema for products is in place");
    Ok(())
}
