//! # sales-platform
//!
//! Multi-tenant sales entities (brands, products, carts, orders, reviews,
//! ...) over a document store. Every entity is served by the same
//! [`EntityService`] façade over the same generic repository, configured
//! by an [`EntityDescriptor`] from the [`catalog`].
//!
//! ```no_run
//! # async fn demo() -> sales_platform::AppResult<()> {
//! use sales_platform::{AppConfig, EntityService, ListQuery, ServiceProps};
//!
//! let platform = sales_platform::bootstrap(&AppConfig::load("production")?).await?;
//! let brands = EntityService::brands(platform.context(), ServiceProps::business("biz1")).await?;
//! let page = brands.list(&ListQuery::new("", r#"{"brand_name": 1}"#, 0, 20)).await?;
//! brands.close().await;
//! # let _ = page;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tracing::info;

pub use sales_core::config::AppConfig;
pub use sales_core::error::{AppError, ErrorKind};
pub use sales_core::result::AppResult;
pub use sales_core::traits::DocumentStore;
pub use sales_core::types::{ListQuery, ListResponse, ListSummary, Record, Scope};
pub use sales_database::StoreManager;
pub use sales_entity::{EntityDescriptor, catalog};
pub use sales_service::{EntityService, ServiceContext, ServiceProps};


/// A connected document store plus the context services are opened with.
#[derive(Debug, Clone)]
pub struct Platform {
    store: StoreManager,
    context: ServiceContext,
}

impl Platform {
    /// Connect the configured store, ensure indexes, and wire the service
    /// context. Does not touch logging.
    pub async fn connect(config: &AppConfig) -> AppResult<Self> {
        let store = StoreManager::connect(&config.database).await?;
        Self::with_manager(store, config).await
    }

    /// Build a platform over an already constructed store (embedding,
    /// tests).
    pub async fn from_store(store: Arc<dyn DocumentStore>, config: &AppConfig) -> AppResult<Self> {
        Self::with_manager(StoreManager::from_store(store), config).await
    }

    async fn with_manager(store: StoreManager, config: &AppConfig) -> AppResult<Self> {
        store.ensure_indexes().await?;
        let context = ServiceContext::new(store.store(), config.repository.clone());

        info!(
            backend = store.name(),
            database = %config.database.database_name,
            "Sales platform ready"
        );
        Ok(Self { store, context })
    }

    /// Context for opening entity services.
    pub fn context(&self) -> &ServiceContext {
        &self.context
    }

    /// The document store manager.
    pub fn store(&self) -> &StoreManager {
        &self.store
    }

    /// Check that the store is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.store.health_check().await
    }

    /// Shut the store down. Open services must be closed first.
    pub async fn shutdown(&self) {
        self.store.close().await;
        info!("Sales platform stopped");
    }
}

/// Process entry point: install logging, then [`Platform::connect`].
///
/// Call once per process; a second call fails with a configuration error
/// because the global subscriber is already installed.
pub async fn bootstrap(config: &AppConfig) -> AppResult<Platform> {
    sales_core::logging::init(&config.logging)?;
    info!("Starting sales platform v{}", env!("CARGO_PKG_VERSION"));
    Platform::connect(config).await
}
