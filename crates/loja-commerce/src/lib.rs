//! E-commerce domain types and logic for the loja backend.
//!
//! This crate is the core of the system: it owns the entities (products,
//! customers, cart lines, purchases) and the rules that convert a cart into an
//! immutable purchase record with point-in-time pricing.
//!
//! - **Catalog**: products with price, stock and a flat discount percentage
//! - **Customer**: customer records with soft deactivation
//! - **Cart**: one mutable cart per customer, capped by live stock
//! - **Purchase**: the finalization engine; snapshots prices, decrements stock
//!
//! Persistence is abstracted behind the repository traits in [`repo`], so the
//! engine is unit-testable without a live database.
//!
//! # Example
//!
//! ```rust,ignore
//! use loja_commerce::prelude::*;
//!
//! let mut product = Product::new("Rust Book", "A book about Rust", Money::from_cents(10_000), 5);
//! product.set_discount(10)?;
//!
//! let mut purchase = Purchase::new(customer_id);
//! purchase.add_item(&mut product, 3)?;
//! assert_eq!(purchase.total, Money::from_cents(27_000));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod customer;
pub mod purchase;
pub mod repo;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    pub use crate::catalog::{CatalogService, DiscountBatchReport, Product};
    pub use crate::customer::{Customer, NewCustomer};

    pub use crate::cart::{CartLine, CartService, CartUpdate};
    pub use crate::purchase::{Purchase, PurchaseEngine, PurchaseLine};

    pub use crate::repo::{
        CartRepository, CustomerRepository, ProductRepository, PurchaseRepository, Store,
    };
}
