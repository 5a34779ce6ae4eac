//! The cart-to-purchase engine.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{CustomerId, ProductId};
use crate::purchase::Purchase;
use crate::repo::{CartRepository, CustomerRepository, ProductRepository, PurchaseRepository};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Converts a customer's cart into an immutable purchase record.
///
/// Finalization is all-or-nothing: every cart line is validated against live
/// stock first, the purchase is built on in-memory copies, and only then are
/// the stock decrements, the purchase insert and the cart clear committed.
/// This is a deliberate strengthening of the source behavior, which applied
/// lines sequentially with no rollback.
///
/// A mutex serializes finalization so two concurrent purchases cannot both
/// pass the stock check before either decrements (the classic check-then-act
/// oversell race).
#[derive(Debug)]
pub struct PurchaseEngine<S> {
    store: Arc<S>,
    gate: Mutex<()>,
}

impl<S> PurchaseEngine<S>
where
    S: ProductRepository + CustomerRepository + CartRepository + PurchaseRepository,
{
    /// Create an engine over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            gate: Mutex::new(()),
        }
    }

    /// Finalize the customer's cart into a purchase.
    ///
    /// Fails with `CustomerNotActive` for deactivated customers, `EmptyCart`
    /// when there is nothing to buy, `InvalidQuantity` for a non-positive
    /// line quantity (defensive; the cart never stores one), and
    /// `InsufficientStock` when a line exceeds the stock the product has
    /// *now*; stock may have shrunk since the quantity was capped in the
    /// cart. On any failure no record is created and no stock moves.
    ///
    /// On success the cart is cleared and the populated purchase returned.
    /// Lines are processed in cart insertion order.
    pub fn create_purchase(&self, customer_id: CustomerId) -> Result<Purchase, CommerceError> {
        let _gate = match self.gate.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let customer = self.store.customer(customer_id)?;
        if !customer.active {
            return Err(CommerceError::CustomerNotActive(customer_id));
        }

        let lines = self.store.lines_for(customer_id)?;
        if lines.is_empty() {
            return Err(CommerceError::EmptyCart(customer_id));
        }

        // Validate every line against current stock before touching anything.
        let mut products: BTreeMap<ProductId, Product> = BTreeMap::new();
        for line in &lines {
            if line.quantity <= 0 {
                return Err(CommerceError::InvalidQuantity(line.quantity));
            }
            let product = self.store.product(&line.product_id)?;
            if line.quantity > product.stock {
                return Err(CommerceError::InsufficientStock {
                    product_id: product.id,
                    requested: line.quantity,
                    available: product.stock,
                });
            }
            products.insert(product.id, product);
        }

        // Build the purchase on in-memory copies.
        let mut purchase = Purchase::new(customer_id);
        for line in &lines {
            let product = products
                .get_mut(&line.product_id)
                .ok_or(CommerceError::ProductNotFound(line.product_id))?;
            purchase.add_item(product, line.quantity)?;
        }

        // Commit: stock decrements, the record, then the cart clear.
        for product in products.values() {
            self.store.update_product(product)?;
        }
        self.store.insert_purchase(purchase.clone())?;
        self.store.clear_cart(customer_id)?;

        info!(
            purchase_id = %purchase.id,
            customer_id = %customer_id,
            lines = purchase.lines.len(),
            total = %purchase.total,
            "purchase finalized"
        );
        Ok(purchase)
    }

    /// Fetch a purchase.
    pub fn purchase(
        &self,
        id: &crate::ids::PurchaseId,
    ) -> Result<Purchase, CommerceError> {
        self.store.purchase(id)
    }

    /// All purchases, in insertion order.
    pub fn purchases(&self) -> Result<Vec<Purchase>, CommerceError> {
        self.store.purchases()
    }
}
