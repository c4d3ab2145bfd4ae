//! SeaORM entities
//!
//! Table models used by the PostgreSQL adapters. These mirror the database
//! schema and are converted to domain entities at the adapter boundary.

pub mod products;
