//! Business and customer lookups backed by the document store.

use std::sync::Arc;

use async_trait::async_trait;

use sales_core::config::RepositoryConfig;
use sales_core::result::AppResult;
use sales_core::traits::{BusinessLookup, CustomerLookup, DocumentStore};
use sales_core::types::{Record, Scope};
use sales_entity::{EntityDescriptor, catalog};

use super::entity::EntityRepository;

/// Fetch one live record through a short-lived session.
async fn fetch(
    store: &dyn DocumentStore,
    descriptor: EntityDescriptor,
    scope: Scope,
    settings: &RepositoryConfig,
    id: &str,
) -> AppResult<Record> {
    let session = store.open_session().await?;
    let repo = EntityRepository::new(Arc::clone(&session), descriptor, scope, settings.clone());
    let result = repo.get(id).await;
    session.close().await;
    result
}

/// Resolves businesses from the platform business collection.
#[derive(Debug, Clone)]
pub struct StoreBusinessLookup {
    store: Arc<dyn DocumentStore>,
    settings: RepositoryConfig,
}

impl StoreBusinessLookup {
    /// Create a lookup over `store`.
    pub fn new(store: Arc<dyn DocumentStore>, settings: RepositoryConfig) -> Self {
        Self { store, settings }
    }
}

#[async_trait]
impl BusinessLookup for StoreBusinessLookup {
    async fn get_business(&self, business_id: &str) -> AppResult<Record> {
        fetch(
            self.store.as_ref(),
            catalog::PLATFORM_BUSINESS,
            Scope::unscoped(),
            &self.settings,
            business_id,
        )
        .await
    }
}

/// Resolves customers from the business's customer collection.
#[derive(Debug, Clone)]
pub struct StoreCustomerLookup {
    store: Arc<dyn DocumentStore>,
    settings: RepositoryConfig,
}

impl StoreCustomerLookup {
    /// Create a lookup over `store`.
    pub fn new(store: Arc<dyn DocumentStore>, settings: RepositoryConfig) -> Self {
        Self { store, settings }
    }
}

#[async_trait]
impl CustomerLookup for StoreCustomerLookup {
    async fn get_customer(&self, business_id: &str, customer_id: &str) -> AppResult<Record> {
        fetch(
            self.store.as_ref(),
            catalog::CUSTOMER,
            Scope::business(business_id),
            &self.settings,
            customer_id,
        )
        .await
    }
}
