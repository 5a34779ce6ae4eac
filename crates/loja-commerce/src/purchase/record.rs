//! Purchase and purchase line types.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{CustomerId, ProductId, PurchaseId, PurchaseLineId};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A finalized purchase.
///
/// Immutable once created except for the cached total, which is recomputed
/// whenever a line is added. Lines are owned exclusively by the purchase and
/// kept in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Purchase {
    /// Unique purchase identifier (opaque token).
    pub id: PurchaseId,
    /// Owning customer. Immutable after creation.
    pub customer_id: CustomerId,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Cached sum of `unit_price * quantity` over all lines.
    pub total: Money,
    /// Line items, ordered by insertion.
    pub lines: Vec<PurchaseLine>,
}

impl Purchase {
    /// Create an empty purchase for a customer, total zero.
    pub fn new(customer_id: CustomerId) -> Self {
        Self {
            id: PurchaseId::generate(),
            customer_id,
            created_at: current_timestamp(),
            total: Money::zero(),
            lines: Vec::new(),
        }
    }

    /// Add `quantity` units of `product` to the purchase.
    ///
    /// If a line for the product already exists its quantity is incremented
    /// and the original price/discount snapshot is kept: once a line exists
    /// its unit economics are frozen for the life of the purchase. A new line
    /// snapshots `effective_price()` and the discount percentage as of now.
    ///
    /// Stock is decremented by the requested quantity either way, clamping at
    /// zero per the stock policy. The cached total is recomputed afterwards.
    pub fn add_item(&mut self, product: &mut Product, quantity: i64) -> Result<(), CommerceError> {
        if let Some(existing) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            existing.quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
        } else {
            self.lines.push(PurchaseLine {
                id: PurchaseLineId::new(self.lines.len() as u64 + 1),
                product_id: product.id,
                product_name: product.name.clone(),
                unit_price: product.effective_price(),
                quantity,
                discount_applied: product.discount_percent,
            });
        }

        if product.remove_stock(quantity) {
            warn!(
                purchase_id = %self.id,
                product_id = %product.id,
                requested = quantity,
                "stock clamped to zero while finalizing purchase"
            );
        }

        self.recompute_total()
    }

    /// Recompute the cached total from the lines.
    fn recompute_total(&mut self) -> Result<(), CommerceError> {
        let mut total = Money::zero();
        for line in &self.lines {
            let subtotal = line
                .unit_price
                .checked_mul(line.quantity)
                .ok_or(CommerceError::Overflow)?;
            total = total.checked_add(subtotal).ok_or(CommerceError::Overflow)?;
        }
        self.total = total;
        Ok(())
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

/// One frozen line inside a purchase.
///
/// Unit price and discount are snapshots taken when the line was created and
/// are decoupled from later product changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseLine {
    /// Sequential identifier within the purchase.
    pub id: PurchaseLineId,
    /// Referenced product.
    pub product_id: ProductId,
    /// Product name at time of purchase.
    pub product_name: String,
    /// Unit price at time of purchase, discount already applied.
    pub unit_price: Money,
    /// Units purchased.
    pub quantity: i64,
    /// Discount percentage that was in force when the line was created.
    pub discount_applied: u8,
}

impl PurchaseLine {
    /// `unit_price * quantity` using the frozen snapshot.
    ///
    /// Saturating is fine here: `recompute_total` already rejected any line
    /// whose product would overflow.
    pub fn subtotal(&self) -> Money {
        self.unit_price.saturating_mul(self.quantity)
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
