//! Repository-backed catalog operations.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use crate::repo::ProductRepository;
use std::sync::Arc;
use tracing::{info, warn};

/// Catalog operations over a product repository.
#[derive(Debug)]
pub struct CatalogService<S> {
    store: Arc<S>,
}

impl<S: ProductRepository> CatalogService<S> {
    /// Create a service over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create and persist a new product.
    pub fn create_product(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        stock: i64,
    ) -> Result<Product, CommerceError> {
        let product = Product::new(name, description, price, stock);
        self.store.insert_product(product.clone())?;
        Ok(product)
    }

    /// Fetch a product.
    pub fn product(&self, id: &ProductId) -> Result<Product, CommerceError> {
        self.store.product(id)
    }

    /// All products.
    pub fn products(&self) -> Result<Vec<Product>, CommerceError> {
        self.store.products()
    }

    /// Persist an updated product.
    pub fn update(&self, product: &Product) -> Result<(), CommerceError> {
        self.store.update_product(product)
    }

    /// Add stock to a product and persist.
    pub fn add_stock(&self, id: &ProductId, qty: i64) -> Result<Product, CommerceError> {
        let mut product = self.store.product(id)?;
        product.add_stock(qty);
        self.store.update_product(&product)?;
        Ok(product)
    }

    /// Remove stock from a product and persist. Over-decrement clamps at
    /// zero; the clamp is logged, never surfaced.
    pub fn remove_stock(&self, id: &ProductId, qty: i64) -> Result<Product, CommerceError> {
        let mut product = self.store.product(id)?;
        if product.remove_stock(qty) {
            warn!(product_id = %product.id, requested = qty, "stock clamped to zero on over-decrement");
        }
        self.store.update_product(&product)?;
        Ok(product)
    }

    /// Discontinue a product: all current stock is removed, the record stays.
    pub fn discontinue(&self, id: &ProductId) -> Result<Product, CommerceError> {
        let mut product = self.store.product(id)?;
        product.discontinue();
        self.store.update_product(&product)?;
        info!(product_id = %product.id, "product discontinued");
        Ok(product)
    }

    /// Set a flat discount on every product currently in stock.
    ///
    /// Per-product persistence failures are logged, recorded on the report
    /// and skipped; the batch always runs to the end. `attempted` is the size
    /// of the filtered set, not the number of successful updates, matching
    /// the fire-and-forget contract of the discount job.
    pub fn apply_discount_to_stocked(
        &self,
        percent: u8,
    ) -> Result<DiscountBatchReport, CommerceError> {
        if percent > 100 {
            return Err(CommerceError::DiscountOutOfRange(percent));
        }

        let stocked = self.store.stocked_products()?;
        let mut report = DiscountBatchReport {
            percent,
            attempted: stocked.len(),
            applied: 0,
            failures: Vec::new(),
        };

        for mut product in stocked {
            product.discount_percent = percent;
            match self.store.update_product(&product) {
                Ok(()) => report.applied += 1,
                Err(e) => {
                    warn!(product_id = %product.id, error = %e, "failed to update product discount, skipping");
                    report.failures.push(DiscountFailure {
                        product_id: product.id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            percent,
            attempted = report.attempted,
            applied = report.applied,
            "discount batch finished"
        );
        Ok(report)
    }
}

/// Outcome of a discount batch run.
///
/// `attempted` deliberately counts the filtered set rather than the updates
/// that succeeded; stricter callers can inspect `applied` and `failures`.
#[derive(Debug, Clone)]
pub struct DiscountBatchReport {
    /// The percentage that was applied.
    pub percent: u8,
    /// Number of in-stock products the batch tried to update.
    pub attempted: usize,
    /// Number of updates that actually succeeded.
    pub applied: usize,
    /// Products that failed to persist, with the reason.
    pub failures: Vec<DiscountFailure>,
}

impl DiscountBatchReport {
    /// Human-readable completion message.
    pub fn summary(&self) -> String {
        format!(
            "discount of {}% applied to {} products",
            self.percent, self.attempted
        )
    }
}

/// A single skipped product in a discount batch.
#[derive(Debug, Clone)]
pub struct DiscountFailure {
    /// The product that could not be updated.
    pub product_id: ProductId,
    /// Why the update failed.
    pub reason: String,
}
