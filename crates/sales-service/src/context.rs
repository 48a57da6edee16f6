//! Collaborators shared by every service instance.

use std::sync::Arc;

use sales_core::config::RepositoryConfig;
use sales_core::traits::{BusinessLookup, CustomerLookup, DocumentStore, IdGenerator};
use sales_core::types::UniqueIdGenerator;
use sales_database::{StoreBusinessLookup, StoreCustomerLookup};

/// Dependencies a service is opened with.
///
/// Cheap to clone; every field is shared.
#[derive(Debug, Clone)]
pub struct ServiceContext {
    /// Document store each service opens its session on.
    pub store: Arc<dyn DocumentStore>,
    /// Repository behavior settings.
    pub settings: RepositoryConfig,
    /// Generator for ids the caller did not supply.
    pub id_generator: Arc<dyn IdGenerator>,
    /// Tenant existence check.
    pub business_lookup: Arc<dyn BusinessLookup>,
    /// Customer existence check.
    pub customer_lookup: Arc<dyn CustomerLookup>,
}

impl ServiceContext {
    /// Wire the store-backed lookups and the default id generator.
    pub fn new(store: Arc<dyn DocumentStore>, settings: RepositoryConfig) -> Self {
        Self {
            business_lookup: Arc::new(StoreBusinessLookup::new(
                Arc::clone(&store),
                settings.clone(),
            )),
            customer_lookup: Arc::new(StoreCustomerLookup::new(
                Arc::clone(&store),
                settings.clone(),
            )),
            id_generator: Arc::new(UniqueIdGenerator::new()),
            store,
            settings,
        }
    }

    /// Replace the id generator.
    pub fn with_id_generator(mut self, id_generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    /// Replace the business lookup.
    pub fn with_business_lookup(mut self, lookup: Arc<dyn BusinessLookup>) -> Self {
        self.business_lookup = lookup;
        self
    }

    /// Replace the customer lookup.
    pub fn with_customer_lookup(mut self, lookup: Arc<dyn CustomerLookup>) -> Self {
        self.customer_lookup = lookup;
        self
    }
}
