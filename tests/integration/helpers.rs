//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use bson::doc;

use sales_database::memory::MemoryStore;
use sales_platform::{
    AppConfig, EntityDescriptor, EntityService, Platform, Record, ServiceProps,
};

/// Businesses that exist in every test store.
pub const BUSINESSES: [&str; 2] = ["biz1", "biz2"];
/// Customers (of `biz1`) that exist in every test store.
pub const CUSTOMERS: [&str; 2] = ["cust1", "cust2"];

/// Test application over an in-memory store.
pub struct TestApp {
    /// The raw store, for unfiltered scans.
    pub store: MemoryStore,
    /// The platform under test.
    pub platform: Platform,
}

impl TestApp {
    /// Create a seeded test application with default configuration.
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Create a seeded test application.
    pub async fn with_config(config: AppConfig) -> Self {
        let store = MemoryStore::new(config.database.collection_prefix.clone());
        for business_id in BUSINESSES {
            store
                .insert_raw(
                    "platform_businesses",
                    doc! { "business_id": business_id, "is_deleted": false },
                )
                .expect("seed business");
        }
        for customer_id in CUSTOMERS {
            store
                .insert_raw(
                    "sales_customer",
                    doc! { "business_id": "biz1", "customer_id": customer_id, "is_deleted": false },
                )
                .expect("seed customer");
        }

        let platform = Platform::from_store(Arc::new(store.clone()), &config)
            .await
            .expect("Failed to build platform");
        Self { store, platform }
    }

    /// Open a service or panic.
    pub async fn service(&self, descriptor: EntityDescriptor, props: ServiceProps) -> EntityService {
        EntityService::open(descriptor, self.platform.context(), props)
            .await
            .expect("Failed to open service")
    }

    /// Unfiltered scan of a logical collection.
    pub fn raw(&self, collection: &str) -> Vec<Record> {
        self.store.documents(collection)
    }

    /// Unfiltered scan for documents whose `field` equals `value`.
    pub fn raw_matching(&self, collection: &str, field: &str, value: &str) -> Vec<Record> {
        self.raw(collection)
            .into_iter()
            .filter(|doc| doc.get_str(field).ok() == Some(value))
            .collect()
    }
}
