//! Store manager that dispatches to the configured backend.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use sales_core::config::{DatabaseConfig, StoreProvider};
use sales_core::error::AppError;
use sales_core::result::AppResult;
use sales_core::traits::{DocumentStore, StoreSession};
use sales_entity::{catalog, fields};

/// Document store manager wrapping the configured backend.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// The inner store.
    inner: Arc<dyn DocumentStore>,
}

impl StoreManager {
    /// Connect to the backend named in configuration.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let inner: Arc<dyn DocumentStore> = match config.provider {
            #[cfg(feature = "mongodb-backend")]
            StoreProvider::Mongodb => {
                info!("Initializing MongoDB document store");
                Arc::new(crate::mongo::MongoStore::connect(config).await?)
            }
            #[cfg(feature = "memory")]
            StoreProvider::Memory => {
                info!("Initializing in-memory document store");
                Arc::new(crate::memory::MemoryStore::from_config(config))
            }
            #[allow(unreachable_patterns)]
            other => {
                return Err(AppError::configuration(format!(
                    "Document store provider {other:?} is not compiled in"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a manager from an existing store (for testing).
    pub fn from_store(store: Arc<dyn DocumentStore>) -> Self {
        Self { inner: store }
    }

    /// Shared handle to the inner store.
    pub fn store(&self) -> Arc<dyn DocumentStore> {
        Arc::clone(&self.inner)
    }

    /// Create the unique id index of every entity collection, plus the
    /// region pincode index.
    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let mut seen = BTreeSet::new();
        let descriptors = catalog::ALL
            .iter()
            .chain(std::iter::once(&catalog::PLATFORM_BUSINESS));
        for descriptor in descriptors {
            let keys = descriptor.unique_keys();
            if seen.insert((descriptor.collection, keys.clone())) {
                self.inner
                    .ensure_unique_index(descriptor.collection, &keys)
                    .await?;
            }
        }
        self.inner
            .ensure_index(
                catalog::REGION.collection,
                &[fields::REGION_PINCODE_FROM, fields::REGION_PINCODE_TO],
            )
            .await?;

        info!(
            backend = self.inner.name(),
            collections = seen.len(),
            "Document store indexes ensured"
        );
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for StoreManager {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn open_session(&self) -> AppResult<Arc<dyn StoreSession>> {
        self.inner.open_session().await
    }

    async fn ensure_unique_index(&self, collection: &str, keys: &[&str]) -> AppResult<()> {
        self.inner.ensure_unique_index(collection, keys).await
    }

    async fn ensure_index(&self, collection: &str, keys: &[&str]) -> AppResult<()> {
        self.inner.ensure_index(collection, keys).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn close(&self) {
        self.inner.close().await
    }
}
