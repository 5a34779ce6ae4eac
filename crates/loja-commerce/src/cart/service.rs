//! Cart mutation rules.

use crate::cart::CartLine;
use crate::error::CommerceError;
use crate::ids::{CartLineId, CustomerId, ProductId};
use crate::repo::{CartRepository, CustomerRepository, ProductRepository};
use std::sync::Arc;
use tracing::debug;

/// Outcome of a cart update.
///
/// The requested quantity is silently capped to available stock; `adjusted`
/// makes the cap visible to callers that want it. The REST layer keeps the
/// original contract and reports plain success either way.
#[derive(Debug, Clone, PartialEq)]
pub enum CartUpdate {
    /// The line now holds `line.quantity` units. `adjusted` is true when the
    /// stored quantity differs from the requested one.
    Set { line: CartLine, adjusted: bool },
    /// The line existed and was deleted because the effective quantity was
    /// zero or below.
    Removed { line_id: CartLineId },
    /// No line existed and none was created.
    Noop,
}

/// Cart operations over the repositories.
#[derive(Debug)]
pub struct CartService<S> {
    store: Arc<S>,
}

impl<S> CartService<S>
where
    S: ProductRepository + CustomerRepository + CartRepository,
{
    /// Create a service over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Set the quantity of the (customer, product) line.
    ///
    /// The stored quantity is `min(quantity, product.stock)`. This is an overwrite,
    /// not an increment. An effective quantity of zero or below deletes the
    /// line (or does nothing when no line exists). Product stock is never
    /// touched here; the cap only reflects stock, it does not reserve it.
    pub fn update_cart(
        &self,
        customer_id: CustomerId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<CartUpdate, CommerceError> {
        // Ensure both ends of the pair exist before mutating anything.
        self.store.customer(customer_id)?;
        let product = self.store.product(product_id)?;

        let effective = quantity.min(product.stock);
        let adjusted = effective != quantity;
        if adjusted {
            debug!(
                customer_id = %customer_id,
                product_id = %product_id,
                requested = quantity,
                capped_to = effective,
                "cart quantity capped to available stock"
            );
        }

        match self.store.find_line(customer_id, product_id)? {
            Some(mut line) => {
                if effective > 0 {
                    self.store.set_line_quantity(line.id, effective)?;
                    line.quantity = effective;
                    Ok(CartUpdate::Set { line, adjusted })
                } else {
                    self.store.delete_line(line.id)?;
                    Ok(CartUpdate::Removed { line_id: line.id })
                }
            }
            None => {
                if effective > 0 {
                    let line = self.store.insert_line(customer_id, product_id, effective)?;
                    Ok(CartUpdate::Set { line, adjusted })
                } else {
                    Ok(CartUpdate::Noop)
                }
            }
        }
    }

    /// Fetch a single line.
    pub fn line(&self, id: CartLineId) -> Result<CartLine, CommerceError> {
        self.store.cart_line(id)
    }

    /// All lines for a customer, in insertion order.
    pub fn lines(&self, customer_id: CustomerId) -> Result<Vec<CartLine>, CommerceError> {
        self.store.lines_for(customer_id)
    }

    /// Delete a single line.
    pub fn remove_line(&self, id: CartLineId) -> Result<(), CommerceError> {
        self.store.delete_line(id)
    }

    /// Delete every line for the customer. No error when already empty.
    pub fn clear_cart(&self, customer_id: CustomerId) -> Result<(), CommerceError> {
        self.store.clear_cart(customer_id)
    }
}
