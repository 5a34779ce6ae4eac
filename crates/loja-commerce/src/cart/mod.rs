//! Shopping cart: per-customer lines capped by live stock.

mod line;
mod service;

pub use line::CartLine;
pub use service::{CartService, CartUpdate};
