//! Repository traits consumed by the domain services.
//!
//! The engine never talks to storage directly; it is handed implementations
//! of these traits so the purchase rules can be exercised without a live
//! database. `loja-store` provides the in-memory implementation.

use crate::cart::CartLine;
use crate::catalog::Product;
use crate::customer::{Customer, NewCustomer};
use crate::error::CommerceError;
use crate::ids::{CartLineId, CustomerId, ProductId, PurchaseId};
use crate::purchase::Purchase;

/// Product persistence.
pub trait ProductRepository {
    /// Insert a new product.
    fn insert_product(&self, product: Product) -> Result<(), CommerceError>;

    /// Fetch a product by id, failing with `ProductNotFound` if absent.
    fn product(&self, id: &ProductId) -> Result<Product, CommerceError>;

    /// Persist an updated product.
    fn update_product(&self, product: &Product) -> Result<(), CommerceError>;

    /// All products.
    fn products(&self) -> Result<Vec<Product>, CommerceError>;

    /// Products with stock greater than zero.
    fn stocked_products(&self) -> Result<Vec<Product>, CommerceError>;
}

/// Customer persistence. Insert and update enforce tax id and email
/// uniqueness.
pub trait CustomerRepository {
    /// Insert a new customer, allocating its sequential id.
    fn insert_customer(&self, draft: NewCustomer) -> Result<Customer, CommerceError>;

    /// Fetch a customer by id, failing with `CustomerNotFound` if absent.
    fn customer(&self, id: CustomerId) -> Result<Customer, CommerceError>;

    /// Persist an updated customer.
    fn update_customer(&self, customer: &Customer) -> Result<(), CommerceError>;

    /// All customers.
    fn customers(&self) -> Result<Vec<Customer>, CommerceError>;
}

/// Cart line persistence. Lines are unique per (customer, product) and
/// iterate in ascending id (insertion) order.
pub trait CartRepository {
    /// Fetch a line by id, failing with `CartLineNotFound` if absent.
    fn cart_line(&self, id: CartLineId) -> Result<CartLine, CommerceError>;

    /// Find the line for a (customer, product) pair, if any.
    fn find_line(
        &self,
        customer: CustomerId,
        product: &ProductId,
    ) -> Result<Option<CartLine>, CommerceError>;

    /// Insert a new line, allocating its sequential id.
    fn insert_line(
        &self,
        customer: CustomerId,
        product: &ProductId,
        quantity: i64,
    ) -> Result<CartLine, CommerceError>;

    /// Overwrite the quantity of an existing line.
    fn set_line_quantity(&self, id: CartLineId, quantity: i64) -> Result<(), CommerceError>;

    /// Delete a line.
    fn delete_line(&self, id: CartLineId) -> Result<(), CommerceError>;

    /// All lines for a customer, in insertion order.
    fn lines_for(&self, customer: CustomerId) -> Result<Vec<CartLine>, CommerceError>;

    /// Delete every line for a customer. Not an error when already empty.
    fn clear_cart(&self, customer: CustomerId) -> Result<(), CommerceError>;
}

/// Purchase persistence. A purchase owns its lines; they are stored and
/// deleted with it.
pub trait PurchaseRepository {
    /// Insert a finalized purchase.
    fn insert_purchase(&self, purchase: Purchase) -> Result<(), CommerceError>;

    /// Fetch a purchase by id, failing with `PurchaseNotFound` if absent.
    fn purchase(&self, id: &PurchaseId) -> Result<Purchase, CommerceError>;

    /// All purchases, in insertion order.
    fn purchases(&self) -> Result<Vec<Purchase>, CommerceError>;
}

/// Blanket alias for a backend implementing every repository.
pub trait Store:
    ProductRepository + CustomerRepository + CartRepository + PurchaseRepository + Send + Sync
{
}

impl<T> Store for T where
    T: ProductRepository + CustomerRepository + CartRepository + PurchaseRepository + Send + Sync
{
}
