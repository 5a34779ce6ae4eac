//! Newtype IDs for type-safe identifiers.
//!
//! Products and purchases use globally-unique opaque tokens (UUID v4);
//! customers, cart lines and purchase lines use ordinary sequential
//! identities allocated by the store. The newtypes prevent accidentally
//! mixing the two, e.g. passing a `CustomerId` where a `ProductId` is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to generate opaque token ID structs backed by UUID v4.
macro_rules! define_token_id {
    ($name:ident) => {
        /// A globally-unique opaque identifier.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wrap an existing UUID.
            pub fn new(id: Uuid) -> Self {
                Self(id)
            }

            /// Generate a new random ID.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse from a string representation.
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Uuid::parse_str(s).map(Self)
            }

            /// Get the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

/// Macro to generate sequential ID structs backed by `u64`.
macro_rules! define_seq_id {
    ($name:ident) => {
        /// A sequential identifier allocated by the store.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw identifier.
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            /// Parse from a decimal string.
            pub fn parse(s: &str) -> Result<Self, std::num::ParseIntError> {
                s.parse().map(Self)
            }

            /// Get the raw value.
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

define_token_id!(ProductId);
define_token_id!(PurchaseId);

define_seq_id!(CustomerId);
define_seq_id!(CartLineId);
define_seq_id!(PurchaseLineId);
