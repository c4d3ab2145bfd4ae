//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod product_repo;
pub mod schema;


pub use product_repo::PostgresProductRepository;
pub use schema::ensure_schema;
