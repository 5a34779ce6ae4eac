//! Product type and stock/pricing rules.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A catalog product.
///
/// Products are never deleted; a discontinued product has its stock forced to
/// zero so historical purchase lines keep a valid reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier (opaque token).
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Longer description.
    pub description: String,
    /// Unit price before discount. Never negative.
    pub price: Money,
    /// Units in stock. Never negative.
    pub stock: i64,
    /// Flat discount percentage, 0..=100.
    pub discount_percent: u8,
}

impl Product {
    /// Create a new product with no discount.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        stock: i64,
    ) -> Self {
        Self {
            id: ProductId::generate(),
            name: name.into(),
            description: description.into(),
            price,
            stock,
            discount_percent: 0,
        }
    }

    /// Add stock. `qty` may be any integer; the resulting level is clamped
    /// at zero so the stock invariant holds for negative adjustments too.
    pub fn add_stock(&mut self, qty: i64) {
        self.stock = (self.stock + qty).max(0);
    }

    /// Remove stock, clamping at zero on over-decrement.
    ///
    /// Returns `true` when the clamp fired. The clamp is policy, not a
    /// failure: callers log it and carry on.
    pub fn remove_stock(&mut self, qty: i64) -> bool {
        self.stock -= qty;
        if self.stock < 0 {
            self.stock = 0;
            true
        } else {
            false
        }
    }

    /// The price a buyer pays right now: `price - price * discount / 100`,
    /// discount rounded half-up to cents.
    pub fn effective_price(&self) -> Money {
        self.price.percent_off(self.discount_percent)
    }

    /// Set the discount percentage, rejecting values above 100.
    pub fn set_discount(&mut self, percent: u8) -> Result<(), CommerceError> {
        if percent > 100 {
            return Err(CommerceError::DiscountOutOfRange(percent));
        }
        self.discount_percent = percent;
        Ok(())
    }

    /// Mark the product as discontinued by removing all current stock.
    pub fn discontinue(&mut self) {
        self.remove_stock(self.stock);
    }

    /// Check if any units are available.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
