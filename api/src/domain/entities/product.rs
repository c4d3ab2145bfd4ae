//! Product domain entity
//!
//! The sole entity of the catalog. Fields are private: a product is built through
//! [`Product::create`] and changed only through its named mutators, each of which
//! validates its input before touching any state.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::DomainError;

/// Maximum product name length, in characters
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum product description length, in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Most fractional digits a stored price keeps
pub const MAX_PRICE_SCALE: u32 = 2;

/// Most integer digits a stored price keeps
pub const MAX_PRICE_INTEGER_DIGITS: u32 = 8;

/// Unique identifier for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ProductId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A sellable product in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    description: Option<String>,
    price: Decimal,
    stock_quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Data needed to create a new product
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
    /// Identity to assign; a fresh one is generated when absent
    pub id: Option<ProductId>,
}

/// Partial update of a product's mutable fields
///
/// `None` means "not supplied". For `description`, `Some(None)` means the field
/// was supplied as null and clears the description.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
}

impl Product {
    /// Create a new product, validating every invariant
    pub fn create(new: NewProduct) -> Result<Self, DomainError> {
        let name = normalize_name(&new.name)?;
        ensure_positive_price(new.price)?;
        ensure_non_negative_stock(new.stock_quantity)?;

        let now = now();
        Ok(Self {
            id: new.id.unwrap_or_default(),
            name,
            description: normalize_description(new.description.as_deref()),
            price: new.price,
            stock_quantity: new.stock_quantity,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a product from its persisted representation.
    ///
    /// Used by persistence adapters only. No validation is performed and no
    /// timestamps are assigned.
    pub fn restore(
        id: ProductId,
        name: String,
        description: Option<String>,
        price: Decimal,
        stock_quantity: i32,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            price,
            stock_quantity,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn stock_quantity(&self) -> i32 {
        self.stock_quantity
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn rename(&mut self, name: &str) -> Result<(), DomainError> {
        self.name = normalize_name(name)?;
        self.touch();
        Ok(())
    }

    /// Replace the description; blank input clears it
    pub fn redescribe(&mut self, description: Option<&str>) {
        self.description = normalize_description(description);
        self.touch();
    }

    pub fn reprice(&mut self, price: Decimal) -> Result<(), DomainError> {
        ensure_positive_price(price)?;
        self.price = price;
        self.touch();
        Ok(())
    }

    pub fn set_stock(&mut self, quantity: i32) -> Result<(), DomainError> {
        ensure_non_negative_stock(quantity)?;
        self.stock_quantity = quantity;
        self.touch();
        Ok(())
    }

    pub fn increase_stock(&mut self, amount: i32) -> Result<(), DomainError> {
        ensure_positive_amount(amount)?;
        let quantity = self.stock_quantity.checked_add(amount).ok_or_else(|| {
            DomainError::InvalidArgument(format!(
                "Stock quantity overflow: {} + {}",
                self.stock_quantity, amount
            ))
        })?;
        self.stock_quantity = quantity;
        self.touch();
        Ok(())
    }

    pub fn decrease_stock(&mut self, amount: i32) -> Result<(), DomainError> {
        ensure_positive_amount(amount)?;
        if amount > self.stock_quantity {
            return Err(DomainError::InsufficientStock {
                available: self.stock_quantity,
                requested: amount,
            });
        }
        self.stock_quantity -= amount;
        self.touch();
        Ok(())
    }

    /// Check whether at least `minimum` units are in stock
    pub fn is_in_stock(&self, minimum: i32) -> bool {
        minimum <= self.stock_quantity
    }

    /// Check whether at least one unit is in stock
    pub fn has_stock(&self) -> bool {
        self.is_in_stock(1)
    }

    // updated_at must move forward on every change, even within one clock tick
    fn touch(&mut self) {
        let now = now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }
}

/// Current time at the storage resolution (microseconds)
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn normalize_name(name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidArgument(
            "Product name cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

fn ensure_positive_price(price: Decimal) -> Result<(), DomainError> {
    if price <= Decimal::ZERO {
        return Err(DomainError::InvalidArgument(
            "Product price must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn ensure_non_negative_stock(quantity: i32) -> Result<(), DomainError> {
    if quantity < 0 {
        return Err(DomainError::InvalidArgument(
            "Stock quantity cannot be negative".to_string(),
        ));
    }
    Ok(())
}

fn ensure_positive_amount(amount: i32) -> Result<(), DomainError> {
    if amount <= 0 {
        return Err(DomainError::InvalidArgument(
            "Quantity must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(name: &str, price: Decimal, stock_quantity: i32) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: Some("A test product".to_string()),
            price,
            stock_quantity,
            id: None,
        }
    }

    fn make_product(stock_quantity: i32) -> Product {
        Product::create(new_product("Laptop", Decimal::new(250000, 2), stock_quantity)).unwrap()
    }

    #[test]
    fn create_trims_and_stamps() {
        let product = Product::create(NewProduct {
            name: "  Laptop  ".to_string(),
            description: Some("  fast machine ".to_string()),
            price: Decimal::new(250000, 2),
            stock_quantity: 10,
            id: None,
        })
        .unwrap();

        assert_eq!(product.name(), "Laptop");
        assert_eq!(product.description(), Some("fast machine"));
        assert_eq!(product.price(), Decimal::new(250000, 2));
        assert_eq!(product.stock_quantity(), 10);
        assert_eq!(product.created_at(), product.updated_at());
    }

    #[test]
    fn create_keeps_supplied_id() {
        let id = ProductId::new();
        let product = Product::create(NewProduct {
            id: Some(id),
            ..new_product("Laptop", Decimal::ONE, 0)
        })
        .unwrap();
        assert_eq!(product.id(), id);
    }

    #[test]
    fn create_generates_distinct_ids() {
        let a = make_product(1);
        let b = make_product(1);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn create_collapses_blank_description() {
        let product = Product::create(NewProduct {
            description: Some("   ".to_string()),
            ..new_product("Laptop", Decimal::ONE, 0)
        })
        .unwrap();
        assert_eq!(product.description(), None);
    }

    #[test]
    fn create_rejects_blank_name() {
        let result = Product::create(new_product("   ", Decimal::TEN, 0));
        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn create_rejects_zero_price() {
        let result = Product::create(new_product("Laptop", Decimal::ZERO, 0));
        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn create_rejects_negative_price() {
        let result = Product::create(new_product("Laptop", Decimal::new(-1, 2), 0));
        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn create_rejects_negative_stock() {
        let result = Product::create(new_product("Laptop", Decimal::ONE, -1));
        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn create_preserves_price_precision() {
        let price: Decimal = "19.99".parse().unwrap();
        let product = Product::create(new_product("Pen", price, 1)).unwrap();
        assert_eq!(product.price().to_string(), "19.99");
    }

    #[test]
    fn rename_trims_and_bumps_updated_at() {
        let mut product = make_product(1);
        let before = product.updated_at();

        product.rename("  Desktop ").unwrap();

        assert_eq!(product.name(), "Desktop");
        assert!(product.updated_at() > before);
    }

    #[test]
    fn rename_rejects_blank_and_leaves_state() {
        let mut product = make_product(1);
        let snapshot = product.clone();

        let result = product.rename("\t ");

        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
        assert_eq!(product, snapshot);
    }

    #[test]
    fn redescribe_sets_and_clears() {
        let mut product = make_product(1);

        product.redescribe(Some(" new text "));
        assert_eq!(product.description(), Some("new text"));

        let before = product.updated_at();
        product.redescribe(Some(""));
        assert_eq!(product.description(), None);
        assert!(product.updated_at() > before);

        product.redescribe(Some("again"));
        product.redescribe(None);
        assert_eq!(product.description(), None);
    }

    #[test]
    fn reprice_rejects_non_positive_and_leaves_state() {
        let mut product = make_product(1);
        let snapshot = product.clone();

        assert!(matches!(
            product.reprice(Decimal::ZERO),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(matches!(
            product.reprice(Decimal::NEGATIVE_ONE),
            Err(DomainError::InvalidArgument(_))
        ));
        assert_eq!(product, snapshot);
    }

    #[test]
    fn set_stock_assigns() {
        let mut product = make_product(3);
        product.set_stock(0).unwrap();
        assert_eq!(product.stock_quantity(), 0);
    }

    #[test]
    fn set_stock_rejects_negative() {
        let mut product = make_product(3);
        let snapshot = product.clone();
        assert!(matches!(
            product.set_stock(-5),
            Err(DomainError::InvalidArgument(_))
        ));
        assert_eq!(product, snapshot);
    }

    #[test]
    fn increase_stock_rejects_non_positive_amount() {
        let mut product = make_product(3);
        let snapshot = product.clone();
        assert!(matches!(
            product.increase_stock(0),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(matches!(
            product.increase_stock(-2),
            Err(DomainError::InvalidArgument(_))
        ));
        assert_eq!(product, snapshot);
    }

    #[test]
    fn increase_stock_rejects_overflow() {
        let mut product = make_product(i32::MAX);
        let snapshot = product.clone();
        assert!(matches!(
            product.increase_stock(1),
            Err(DomainError::InvalidArgument(_))
        ));
        assert_eq!(product, snapshot);
    }

    #[test]
    fn decrease_stock_to_zero() {
        let mut product = make_product(4);
        product.decrease_stock(4).unwrap();
        assert_eq!(product.stock_quantity(), 0);
        assert!(!product.has_stock());
    }

    #[test]
    fn decrease_stock_insufficient_carries_amounts() {
        let mut product = make_product(15);
        let snapshot = product.clone();

        let result = product.decrease_stock(100);

        assert_eq!(
            result,
            Err(DomainError::InsufficientStock {
                available: 15,
                requested: 100
            })
        );
        assert_eq!(product, snapshot);
    }

    #[test]
    fn decrease_stock_rejects_non_positive_amount() {
        let mut product = make_product(15);
        assert!(matches!(
            product.decrease_stock(0),
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[test]
    fn has_stock_defaults_to_one_unit() {
        assert!(make_product(1).has_stock());
        assert!(!make_product(0).has_stock());
    }

    #[test]
    fn restore_keeps_timestamps() {
        let original = make_product(2);
        let restored = Product::restore(
            original.id(),
            original.name().to_string(),
            original.description().map(str::to_string),
            original.price(),
            original.stock_quantity(),
            original.created_at(),
            original.updated_at(),
        );
        assert_eq!(restored, original);
    }

    #[test]
    fn product_id_display() {
        let id = ProductId(Uuid::nil());
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000000");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn price() -> impl Strategy<Value = Decimal> {
            (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
        }

        proptest! {
            #[test]
            fn is_in_stock_iff_minimum_fits(stock in 0i32..10_000, minimum in -10i32..10_010) {
                let product = make_product(stock);
                prop_assert_eq!(product.is_in_stock(minimum), minimum <= stock);
            }

            #[test]
            fn reprice_assigns_and_advances(p in price()) {
                let mut product = make_product(1);
                let before = product.updated_at();
                product.reprice(p).unwrap();
                prop_assert_eq!(product.price(), p);
                prop_assert!(product.updated_at() > before);
            }

            #[test]
            fn reprice_non_positive_is_rejected(cents in -100_000i64..=0) {
                let mut product = make_product(1);
                let snapshot = product.clone();
                let result = product.reprice(Decimal::new(cents, 2));
                prop_assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
                prop_assert_eq!(product, snapshot);
            }

            #[test]
            fn decrease_then_increase_restores_stock(
                (stock, amount) in (1i32..100_000).prop_flat_map(|s| (Just(s), 1..=s))
            ) {
                let mut product = make_product(stock);
                let t0 = product.updated_at();
                product.decrease_stock(amount).unwrap();
                let t1 = product.updated_at();
                product.increase_stock(amount).unwrap();
                prop_assert_eq!(product.stock_quantity(), stock);
                prop_assert!(t1 > t0);
                prop_assert!(product.updated_at() > t1);
            }

            #[test]
            fn decrease_beyond_stock_is_rejected(stock in 0i32..10_000, extra in 1i32..10_000) {
                let mut product = make_product(stock);
                let requested = stock + extra;
                let result = product.decrease_stock(requested);
                prop_assert_eq!(
                    result,
                    Err(DomainError::InsufficientStock { available: stock, requested })
                );
                prop_assert_eq!(product.stock_quantity(), stock);
            }

            #[test]
            fn updated_at_never_precedes_created_at(
                name in "[A-Za-z][A-Za-z0-9 ]{0,50}",
                p in price(),
                qty in 0i32..1000,
            ) {
                let mut product = make_product(5);
                product.rename(&name).unwrap();
                product.reprice(p).unwrap();
                product.set_stock(qty).unwrap();
                prop_assert!(product.updated_at() >= product.created_at());
                prop_assert_eq!(product.name(), name.trim());
            }
        }
    }
}
