//! Purchase finalization: the cart-to-purchase transaction engine.

mod engine;
mod record;

pub use engine::PurchaseEngine;
pub use record::{Purchase, PurchaseLine};
