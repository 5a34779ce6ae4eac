//! RwLock-guarded in-memory tables.

use loja_commerce::cart::CartLine;
use loja_commerce::catalog::Product;
use loja_commerce::customer::{Customer, NewCustomer};
use loja_commerce::error::CommerceError;
use loja_commerce::ids::{CartLineId, CustomerId, ProductId, PurchaseId};
use loja_commerce::purchase::Purchase;
use loja_commerce::repo::{
    CartRepository, CustomerRepository, ProductRepository, PurchaseRepository,
};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

#[derive(Debug, Default)]
struct State {
    products: BTreeMap<ProductId, Product>,
    customers: BTreeMap<CustomerId, Customer>,
    cart_lines: BTreeMap<CartLineId, CartLine>,
    purchases: Vec<Purchase>,
    next_customer_id: u64,
    next_cart_line_id: u64,
}

/// In-memory store implementing every repository trait.
///
/// `BTreeMap` tables keyed by sequential ids give deterministic,
/// insertion-ordered iteration, which is what fixes the cart line order the
/// purchase engine sees.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl ProductRepository for MemoryStore {
    fn insert_product(&self, product: Product) -> Result<(), CommerceError> {
        self.write().products.insert(product.id, product);
        Ok(())
    }

    fn product(&self, id: &ProductId) -> Result<Product, CommerceError> {
        self.read()
            .products
            .get(id)
            .cloned()
            .ok_or(CommerceError::ProductNotFound(*id))
    }

    fn update_product(&self, product: &Product) -> Result<(), CommerceError> {
        let mut state = self.write();
        let slot = state
            .products
            .get_mut(&product.id)
            .ok_or(CommerceError::ProductNotFound(product.id))?;
        *slot = product.clone();
        Ok(())
    }

    fn products(&self) -> Result<Vec<Product>, CommerceError> {
        Ok(self.read().products.values().cloned().collect())
    }

    fn stocked_products(&self) -> Result<Vec<Product>, CommerceError> {
        Ok(self
            .read()
            .products
            .values()
            .filter(|p| p.stock > 0)
            .cloned()
            .collect())
    }
}

impl CustomerRepository for MemoryStore {
    fn insert_customer(&self, draft: NewCustomer) -> Result<Customer, CommerceError> {
        let mut state = self.write();
        for existing in state.customers.values() {
            if existing.tax_id == draft.tax_id {
                return Err(CommerceError::DuplicateTaxId(draft.tax_id));
            }
            if existing.email == draft.email {
                return Err(CommerceError::DuplicateEmail(draft.email));
            }
        }
        state.next_customer_id += 1;
        let customer = Customer::from_draft(CustomerId::new(state.next_customer_id), draft);
        debug!(customer_id = %customer.id, "customer inserted");
        state.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    fn customer(&self, id: CustomerId) -> Result<Customer, CommerceError> {
        self.read()
            .customers
            .get(&id)
            .cloned()
            .ok_or(CommerceError::CustomerNotFound(id))
    }

    fn update_customer(&self, customer: &Customer) -> Result<(), CommerceError> {
        let mut state = self.write();
        if !state.customers.contains_key(&customer.id) {
            return Err(CommerceError::CustomerNotFound(customer.id));
        }
        for existing in state.customers.values() {
            if existing.id == customer.id {
                continue;
            }
            if existing.tax_id == customer.tax_id {
                return Err(CommerceError::DuplicateTaxId(customer.tax_id.clone()));
            }
            if existing.email == customer.email {
                return Err(CommerceError::DuplicateEmail(customer.email.clone()));
            }
        }
        state.customers.insert(customer.id, customer.clone());
        Ok(())
    }

    fn customers(&self) -> Result<Vec<Customer>, CommerceError> {
        Ok(self.read().customers.values().cloned().collect())
    }
}

impl CartRepository for MemoryStore {
    fn cart_line(&self, id: CartLineId) -> Result<CartLine, CommerceError> {
        self.read()
            .cart_lines
            .get(&id)
            .cloned()
            .ok_or(CommerceError::CartLineNotFound(id))
    }

    fn find_line(
        &self,
        customer: CustomerId,
        product: &ProductId,
    ) -> Result<Option<CartLine>, CommerceError> {
        Ok(self
            .read()
            .cart_lines
            .values()
            .find(|l| l.customer_id == customer && l.product_id == *product)
            .cloned())
    }

    fn insert_line(
        &self,
        customer: CustomerId,
        product: &ProductId,
        quantity: i64,
    ) -> Result<CartLine, CommerceError> {
        let mut state = self.write();
        state.next_cart_line_id += 1;
        let line = CartLine {
            id: CartLineId::new(state.next_cart_line_id),
            customer_id: customer,
            product_id: *product,
            quantity,
        };
        state.cart_lines.insert(line.id, line.clone());
        Ok(line)
    }

    fn set_line_quantity(&self, id: CartLineId, quantity: i64) -> Result<(), CommerceError> {
        let mut state = self.write();
        let line = state
            .cart_lines
            .get_mut(&id)
            .ok_or(CommerceError::CartLineNotFound(id))?;
        line.quantity = quantity;
        Ok(())
    }

    fn delete_line(&self, id: CartLineId) -> Result<(), CommerceError> {
        self.write()
            .cart_lines
            .remove(&id)
            .map(|_| ())
            .ok_or(CommerceError::CartLineNotFound(id))
    }

    fn lines_for(&self, customer: CustomerId) -> Result<Vec<CartLine>, CommerceError> {
        // BTreeMap iteration is ascending by id, i.e. insertion order.
        Ok(self
            .read()
            .cart_lines
            .values()
            .filter(|l| l.customer_id == customer)
            .cloned()
            .collect())
    }

    fn clear_cart(&self, customer: CustomerId) -> Result<(), CommerceError> {
        let mut state = self.write();
        let before = state.cart_lines.len();
        state.cart_lines.retain(|_, l| l.customer_id != customer);
        debug!(customer_id = %customer, removed = before - state.cart_lines.len(), "cart cleared");
        Ok(())
    }
}

impl PurchaseRepository for MemoryStore {
    fn insert_purchase(&self, purchase: Purchase) -> Result<(), CommerceError> {
        self.write().purchases.push(purchase);
        Ok(())
    }

    fn purchase(&self, id: &PurchaseId) -> Result<Purchase, CommerceError> {
        self.read()
            .purchases
            .iter()
            .find(|p| p.id == *id)
            .cloned()
            .ok_or(CommerceError::PurchaseNotFound(*id))
    }

    fn purchases(&self) -> Result<Vec<Purchase>, CommerceError> {
        Ok(self.read().purchases.clone())
    }
}
