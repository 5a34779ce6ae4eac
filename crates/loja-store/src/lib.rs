//! In-memory persistence for the loja backend.
//!
//! [`MemoryStore`] implements every repository trait from `loja-commerce`
//! behind a single `RwLock`, with insertion-ordered tables and sequential id
//! allocation. It backs the default runtime as well as the test suites; the
//! domain services only ever see the traits.

mod memory;
pub mod seed;

pub use memory::MemoryStore;
