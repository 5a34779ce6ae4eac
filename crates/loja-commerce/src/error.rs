//! Commerce error types.

use crate::ids::{CartLineId, CustomerId, ProductId, PurchaseId};
use thiserror::Error;

/// Errors that can occur in commerce operations.
///
/// Each failure the purchase engine can signal is a distinct variant so the
/// API layer can branch on cause instead of matching on message text.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// Customer not found.
    #[error("customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// Cart line not found.
    #[error("cart line not found: {0}")]
    CartLineNotFound(CartLineId),

    /// Purchase not found.
    #[error("purchase not found: {0}")]
    PurchaseNotFound(PurchaseId),

    /// The customer has been deactivated and cannot transact.
    #[error("customer is not active: {0}")]
    CustomerNotActive(CustomerId),

    /// The customer's cart has no lines to finalize.
    #[error("cart is empty for customer {0}")]
    EmptyCart(CustomerId),

    /// A quantity that must be positive was zero or negative.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// A cart line asks for more units than the product currently has.
    #[error("insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Tax id already registered to another customer.
    #[error("tax id already registered: {0}")]
    DuplicateTaxId(String),

    /// Email already registered to another customer.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// Discount percentage outside 0..=100.
    #[error("discount percent out of range: {0}")]
    DiscountOutOfRange(u8),

    /// Arithmetic overflow in money calculation.
    #[error("arithmetic overflow in money calculation")]
    Overflow,

    /// Malformed or out-of-range input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unexpected persistence failure.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Storage(e.to_string())
    }
}
