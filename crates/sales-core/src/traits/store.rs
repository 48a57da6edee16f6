//! Document store traits for pluggable database backends.

use std::sync::Arc;

use async_trait::async_trait;
use bson::Document;

use crate::result::AppResult;

/// Options for [`StoreSession::find`].
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// Sort document (`{field: 1 | -1, ...}`).
    pub sort: Option<Document>,
    /// Documents to skip (0 = none).
    pub skip: u64,
    /// Maximum documents to return (0 = unlimited).
    pub limit: u64,
}

/// String comparison rules for a write's filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collation {
    /// ICU locale, e.g. `"en"`.
    pub locale: String,
    /// Compare base characters only (primary strength).
    pub case_insensitive: bool,
}

impl Collation {
    /// Primary-strength (case-insensitive) collation for a locale.
    pub fn case_insensitive(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            case_insensitive: true,
        }
    }
}

/// Options for [`StoreSession::delete_one`].
#[derive(Debug, Clone, Default)]
pub struct DeleteOptions {
    /// Collation applied to the filter match.
    pub collation: Option<Collation>,
}

/// Result of an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Documents matching the filter.
    pub matched: u64,
    /// Documents actually changed.
    pub modified: u64,
}

/// A session against the document store, owned by one service instance.
///
/// Collection arguments are physical names (see
/// [`StoreSession::collection_name`]). Every call on a closed session
/// fails with `CLOSED_SERVICE`.
#[async_trait]
pub trait StoreSession: Send + Sync + std::fmt::Debug + 'static {
    /// Physical collection name for a logical one.
    fn collection_name(&self, collection: &str) -> String;

    /// Find all documents matching `filter`.
    async fn find(
        &self,
        collection: &str,
        filter: Document,
        options: FindOptions,
    ) -> AppResult<Vec<Document>>;

    /// Find the first document matching `filter`.
    async fn find_one(&self, collection: &str, filter: Document) -> AppResult<Option<Document>>;

    /// Count documents matching `filter`.
    async fn count(&self, collection: &str, filter: Document) -> AppResult<u64>;

    /// Insert one document.
    async fn insert_one(&self, collection: &str, document: Document) -> AppResult<()>;

    /// Apply `$set: set` to the first document matching `filter`.
    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        set: Document,
    ) -> AppResult<UpdateOutcome>;

    /// Remove the first document matching `filter`. Returns the count removed.
    async fn delete_one(
        &self,
        collection: &str,
        filter: Document,
        options: DeleteOptions,
    ) -> AppResult<u64>;

    /// Release the session. Idempotent.
    async fn close(&self);

    /// Whether [`StoreSession::close`] has been called.
    fn is_closed(&self) -> bool;
}

/// A document store backend (MongoDB, in-memory).
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Open a session for one service instance.
    async fn open_session(&self) -> AppResult<Arc<dyn StoreSession>>;

    /// Create a unique index over `keys` on a logical collection.
    async fn ensure_unique_index(&self, collection: &str, keys: &[&str]) -> AppResult<()>;

    /// Create a non-unique index over `keys` on a logical collection.
    async fn ensure_index(&self, collection: &str, keys: &[&str]) -> AppResult<()>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Shut the backend down.
    async fn close(&self);
}
