//! Per-service MongoDB session.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::options::{Collation as DriverCollation, CollationStrength};
use mongodb::{Collection, Database};
use tracing::debug;

use sales_core::error::AppError;
use sales_core::result::AppResult;
use sales_core::traits::{Collation, DeleteOptions, FindOptions, StoreSession, UpdateOutcome};

use super::error::map_driver_error;

/// A logical session over the shared client pool.
///
/// Owns no server resources; closing it only stops further use.
#[derive(Debug)]
pub struct MongoSession {
    database: Database,
    collection_prefix: String,
    operation_timeout: Option<Duration>,
    closed: AtomicBool,
}

impl MongoSession {
    pub(crate) fn new(
        database: Database,
        collection_prefix: String,
        operation_timeout: Option<Duration>,
    ) -> Self {
        Self {
            database,
            collection_prefix,
            operation_timeout,
            closed: AtomicBool::new(false),
        }
    }

    fn collection(&self, name: &str) -> AppResult<Collection<Document>> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(AppError::closed_service("Store session is closed"));
        }
        Ok(self.database.collection(name))
    }

    /// Run a driver call under the configured operation timeout.
    async fn run<T, F>(&self, operation: &str, call: F) -> AppResult<T>
    where
        F: Future<Output = mongodb::error::Result<T>>,
    {
        let result = match self.operation_timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                AppError::repository(format!("MongoDB {operation} timed out after {limit:?}"))
            })?,
            None => call.await,
        };
        result.map_err(|e| map_driver_error(operation, e))
    }
}

fn driver_collation(collation: Collation) -> DriverCollation {
    let strength = if collation.case_insensitive {
        CollationStrength::Primary
    } else {
        CollationStrength::Tertiary
    };
    DriverCollation::builder()
        .locale(collation.locale)
        .strength(strength)
        .case_level(false)
        .build()
}

#[async_trait]
impl StoreSession for MongoSession {
    fn collection_name(&self, collection: &str) -> String {
        format!("{}{}", self.collection_prefix, collection)
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        options: FindOptions,
    ) -> AppResult<Vec<Document>> {
        let coll = self.collection(collection)?;
        self.run("find", async {
            let mut action = coll.find(filter);
            if let Some(sort) = options.sort {
                action = action.sort(sort);
            }
            if options.skip > 0 {
                action = action.skip(options.skip);
            }
            if options.limit > 0 {
                action = action.limit(i64::try_from(options.limit).unwrap_or(i64::MAX));
            }
            action.await?.try_collect::<Vec<Document>>().await
        })
        .await
    }

    async fn find_one(&self, collection: &str, filter: Document) -> AppResult<Option<Document>> {
        let coll = self.collection(collection)?;
        self.run("findOne", async { coll.find_one(filter).await }).await
    }

    async fn count(&self, collection: &str, filter: Document) -> AppResult<u64> {
        let coll = self.collection(collection)?;
        self.run("countDocuments", async { coll.count_documents(filter).await })
            .await
    }

    async fn insert_one(&self, collection: &str, document: Document) -> AppResult<()> {
        let coll = self.collection(collection)?;
        let inserted = self
            .run("insertOne", async { coll.insert_one(document).await })
            .await?;
        debug!(collection, id = %inserted.inserted_id, "Inserted document");
        Ok(())
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        set: Document,
    ) -> AppResult<UpdateOutcome> {
        let coll = self.collection(collection)?;
        let result = self
            .run("updateOne", async {
                coll.update_one(filter, doc! { "$set": set }).await
            })
            .await?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(
        &self,
        collection: &str,
        filter: Document,
        options: DeleteOptions,
    ) -> AppResult<u64> {
        let coll = self.collection(collection)?;
        let result = self
            .run("deleteOne", async {
                let mut action = coll.delete_one(filter);
                if let Some(collation) = options.collation {
                    action = action.collation(driver_collation(collation));
                }
                action.await
            })
            .await?;
        Ok(result.deleted_count)
    }

    async fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            debug!("Closed MongoDB session");
        }
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
