//! Product catalog: stock and pricing.

mod product;
mod service;

pub use product::Product;
pub use service::{CatalogService, DiscountBatchReport, DiscountFailure};
