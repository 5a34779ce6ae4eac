//! Customer records.

use crate::ids::CustomerId;
use serde::{Deserialize, Serialize};

/// A customer.
///
/// Deactivation is soft: the record stays, `active` flips to false, and there
/// is no reactivate operation in the current scope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    /// Sequential identifier.
    pub id: CustomerId,
    /// First name.
    pub name: String,
    /// Surname.
    pub surname: String,
    /// Unique tax identifier (11 or 14 digits).
    pub tax_id: String,
    /// Unique email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Postal address.
    pub address: String,
    /// Whether the customer can transact.
    pub active: bool,
}

impl Customer {
    /// Build a customer from a draft and a store-allocated id.
    pub fn from_draft(id: CustomerId, draft: NewCustomer) -> Self {
        Self {
            id,
            name: draft.name,
            surname: draft.surname,
            tax_id: draft.tax_id,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            active: true,
        }
    }

    /// Soft-deactivate. Irreversible in the current scope.
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Field bundle for a customer about to be inserted; the store allocates the
/// id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub surname: String,
    pub tax_id: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}
