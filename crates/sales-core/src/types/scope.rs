//! Tenant (and customer) scope fixed at service construction.

use serde::{Deserialize, Serialize};

/// The tenant and optional customer every query is restricted to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    /// Owning business. `None` only for entities that are not tenant-scoped.
    pub business_id: Option<String>,
    /// Owning customer, for customer-scoped entities.
    pub customer_id: Option<String>,
}

impl Scope {
    /// Scope restricted to one business.
    pub fn business(business_id: impl Into<String>) -> Self {
        Self {
            business_id: Some(business_id.into()),
            customer_id: None,
        }
    }

    /// Scope restricted to one customer of one business.
    pub fn customer(business_id: impl Into<String>, customer_id: impl Into<String>) -> Self {
        Self {
            business_id: Some(business_id.into()),
            customer_id: Some(customer_id.into()),
        }
    }

    /// Unrestricted scope (platform-level collections).
    pub fn unscoped() -> Self {
        Self::default()
    }
}
