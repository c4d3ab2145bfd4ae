//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod product;

pub use product::{
    NewProduct, Product, ProductId, ProductUpdate, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH,
    MAX_PRICE_INTEGER_DIGITS, MAX_PRICE_SCALE,
};
