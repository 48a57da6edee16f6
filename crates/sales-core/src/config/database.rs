//! Document store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which document store backend to connect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    /// MongoDB via the official driver.
    #[default]
    Mongodb,
    /// In-process store (tests and embedded use).
    Memory,
}

/// Document store connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Backend selection.
    #[serde(default)]
    pub provider: StoreProvider,
    /// MongoDB connection string.
    #[serde(default = "default_uri")]
    pub uri: String,
    /// Database holding the sales collections.
    #[serde(default = "default_database_name")]
    pub database_name: String,
    /// Prefix prepended to every collection name.
    #[serde(default = "default_collection_prefix")]
    pub collection_prefix: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
    /// Minimum number of pooled connections.
    #[serde(default)]
    pub min_pool_size: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Server selection timeout in seconds.
    #[serde(default = "default_server_selection_timeout")]
    pub server_selection_timeout_seconds: u64,
    /// Per-operation timeout in seconds (0 = driver default).
    #[serde(default)]
    pub operation_timeout_seconds: u64,
    /// Application name reported to the server.
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

impl DatabaseConfig {
    /// Per-operation timeout, if one is configured.
    pub fn operation_timeout(&self) -> Option<Duration> {
        (self.operation_timeout_seconds > 0)
            .then(|| Duration::from_secs(self.operation_timeout_seconds))
    }

    /// Full collection name for a logical collection.
    pub fn collection_name(&self, collection: &str) -> String {
        format!("{}{}", self.collection_prefix, collection)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            provider: StoreProvider::default(),
            uri: default_uri(),
            database_name: default_database_name(),
            collection_prefix: default_collection_prefix(),
            max_pool_size: default_max_pool_size(),
            min_pool_size: 0,
            connect_timeout_seconds: default_connect_timeout(),
            server_selection_timeout_seconds: default_server_selection_timeout(),
            operation_timeout_seconds: 0,
            app_name: default_app_name(),
        }
    }
}

fn default_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database_name() -> String {
    "sales".to_string()
}

fn default_collection_prefix() -> String {
    "zc_".to_string()
}

fn default_max_pool_size() -> u32 {
    20
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_server_selection_timeout() -> u64 {
    30
}

fn default_app_name() -> String {
    "sales-platform".to_string()
}
