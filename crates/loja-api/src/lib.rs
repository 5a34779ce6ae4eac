//! REST surface for the loja backend.
//!
//! This crate is the handler layer only: [`Api::dispatch`] maps a method,
//! path and JSON body onto the domain services and yields an [`ApiResponse`]
//! (status code plus JSON body). Binding it to a listener is the embedding
//! binary's job; the whole surface runs in tests without one.
//!
//! # Example
//!
//! ```rust,ignore
//! use loja_api::{Api, ApiConfig};
//!
//! let api = Api::new(store, ApiConfig::new().with_base_path("/api"));
//! let resp = api.dispatch(&Method::GET, "/api/produtos", None);
//! assert_eq!(resp.status, StatusCode::OK);
//! ```

mod config;
mod handlers;
mod response;
mod router;

pub use config::ApiConfig;
pub use response::ApiResponse;
pub use router::Api;
