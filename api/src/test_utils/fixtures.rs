//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use rust_decimal::Decimal;

use crate::domain::entities::{NewProduct, Product};

/// Creation input for a laptop with 10 units in stock
pub fn test_new_product() -> NewProduct {
    NewProduct {
        name: "Laptop".to_string(),
        description: Some("High-performance laptop for developers".to_string()),
        price: Decimal::new(250000, 2),
        stock_quantity: 10,
        id: None,
    }
}

/// Create a test product with default values
pub fn test_product() -> Product {
    test_product_with_stock(10)
}

/// Create a test product with a specific stock quantity
pub fn test_product_with_stock(stock_quantity: i32) -> Product {
    Product::create(NewProduct {
        stock_quantity,
        ..test_new_product()
    })
    .expect("fixture product is valid")
}

/// Create a test product with a specific name
pub fn test_product_named(name: &str) -> Product {
    Product::create(NewProduct {
        name: name.to_string(),
        ..test_new_product()
    })
    .expect("fixture product is valid")
}
