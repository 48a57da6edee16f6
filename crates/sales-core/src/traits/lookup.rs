//! Existence lookups for the scopes a service is opened with.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::Record;

/// Looks up businesses (tenants).
#[async_trait]
pub trait BusinessLookup: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch a business. Fails with `NOT_FOUND` if it does not exist.
    async fn get_business(&self, business_id: &str) -> AppResult<Record>;
}

/// Looks up customers of a business.
#[async_trait]
pub trait CustomerLookup: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch a customer. Fails with `NOT_FOUND` if it does not exist.
    async fn get_customer(&self, business_id: &str, customer_id: &str) -> AppResult<Record>;
}
