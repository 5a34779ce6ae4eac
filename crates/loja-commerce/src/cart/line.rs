//! Cart line type.

use crate::ids::{CartLineId, CustomerId, ProductId};
use serde::{Deserialize, Serialize};

/// One (customer, product) entry in a customer's active cart.
///
/// Unique per (customer, product). A stored line always has a positive
/// quantity; a line driven to zero or below is deleted instead. Lines are
/// ephemeral: finalizing a purchase clears them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Sequential identifier.
    pub id: CartLineId,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Referenced product.
    pub product_id: ProductId,
    /// Units requested, always positive when stored.
    pub quantity: i64,
}
