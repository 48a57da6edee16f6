//! Generic tenant-scoped repository.

use std::sync::Arc;

use bson::Document;
use tracing::{debug, warn};

use sales_core::config::RepositoryConfig;
use sales_core::error::AppError;
use sales_core::result::AppResult;
use sales_core::traits::{Collation, DeleteOptions, FindOptions, StoreSession, UpdateOutcome};
use sales_core::types::{ListQuery, ListResponse, Record, Scope};
use sales_core::types::record::string_field;
use sales_entity::lifecycle::{self, AuditStamp};
use sales_entity::{EntityDescriptor, fields};

use crate::filter::{and_with, parse_filter, parse_sort};

/// CRUD over one entity's collection, restricted to one tenant scope.
///
/// Every read and write carries the scope filter; reads also exclude
/// soft-deleted records unless asked otherwise.
#[derive(Debug, Clone)]
pub struct EntityRepository {
    session: Arc<dyn StoreSession>,
    descriptor: EntityDescriptor,
    scope: Scope,
    collection: String,
    settings: RepositoryConfig,
    actor: Option<String>,
}

impl EntityRepository {
    /// Create a repository over `session` for `descriptor` within `scope`.
    pub fn new(
        session: Arc<dyn StoreSession>,
        descriptor: EntityDescriptor,
        scope: Scope,
        settings: RepositoryConfig,
    ) -> Self {
        let collection = session.collection_name(descriptor.collection);
        Self {
            session,
            descriptor,
            scope,
            collection,
            settings,
            actor: None,
        }
    }

    /// Record `actor` as `created_by` / `updated_by` on writes.
    pub fn with_actor(mut self, actor: Option<String>) -> Self {
        self.actor = actor;
        self
    }

    /// The entity this repository serves.
    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.descriptor
    }

    /// The tenant scope applied to every operation.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Physical collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn stamp(&self) -> AuditStamp {
        AuditStamp::now(self.actor.as_deref())
    }

    fn live_scope(&self, include_deleted: bool) -> Document {
        let mut filter = self.descriptor.scope_filter(&self.scope);
        if !include_deleted {
            filter.insert(fields::IS_DELETED, false);
        }
        filter
    }

    fn live_id_filter(&self, id: &str) -> Document {
        let mut filter = self.descriptor.id_filter(id, &self.scope);
        filter.insert(fields::IS_DELETED, false);
        filter
    }

    /// Page through records in scope.
    ///
    /// `total` counts every live record in scope, `filtered` those also
    /// matching the caller filter, and `result` the returned page.
    pub async fn list(&self, query: &ListQuery) -> AppResult<ListResponse> {
        let strict = self.settings.strict_filters;
        let caller_filter = parse_filter(&query.filter, strict)?;
        let sort = parse_sort(&query.sort, strict)?;

        let scope_filter = self.live_scope(query.include_deleted);
        let filter = and_with(caller_filter, scope_filter.clone());

        let total = self.session.count(&self.collection, scope_filter).await?;
        let filtered = self.session.count(&self.collection, filter.clone()).await?;
        let options = FindOptions {
            sort,
            skip: query.skip,
            limit: query.limit,
        };
        let results: Vec<Record> = self
            .session
            .find(&self.collection, filter, options)
            .await?
            .into_iter()
            .map(lifecycle::strip_for_get)
            .collect();

        debug!(
            entity = self.descriptor.name,
            total,
            filtered,
            returned = results.len(),
            "Listed records"
        );
        Ok(ListResponse::new(results, total, filtered))
    }

    /// Fetch one live record by id.
    pub async fn get(&self, id: &str) -> AppResult<Record> {
        self.session
            .find_one(&self.collection, self.live_id_filter(id))
            .await?
            .map(lifecycle::strip_for_get)
            .ok_or_else(|| self.not_found(id))
    }

    /// Fetch the first live record matching a filter expression.
    pub async fn find(&self, filter: &str) -> AppResult<Record> {
        let caller_filter = parse_filter(filter, self.settings.strict_filters)?;
        let filter = and_with(caller_filter, self.live_scope(false));
        self.session
            .find_one(&self.collection, filter)
            .await?
            .map(lifecycle::strip_for_get)
            .ok_or_else(|| {
                AppError::not_found(format!("No {} matches the filter", self.descriptor.name))
            })
    }

    /// Insert a record and return it as stored.
    ///
    /// The record must already carry its id and tenant fields.
    pub async fn create(&self, record: Record) -> AppResult<Record> {
        let id = string_field(&record, self.descriptor.id_field)
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "{} record is missing '{}'",
                    self.descriptor.name, self.descriptor.id_field
                ))
            })?;

        let record = lifecycle::prepare_for_create(record, &self.stamp());
        self.session.insert_one(&self.collection, record).await?;
        debug!(entity = self.descriptor.name, id = %id, "Created record");
        self.get(&id).await
    }

    /// Apply a partial update to a live record without reading it back.
    pub async fn update_fields(&self, id: &str, record: Record) -> AppResult<UpdateOutcome> {
        let set = lifecycle::prepare_for_update(record, &self.stamp());
        let outcome = self
            .session
            .update_one(&self.collection, self.live_id_filter(id), set)
            .await?;
        debug!(
            entity = self.descriptor.name,
            id,
            matched = outcome.matched,
            modified = outcome.modified,
            "Updated record"
        );
        Ok(outcome)
    }

    /// Apply a partial update and return the updated record.
    pub async fn update(&self, id: &str, record: Record) -> AppResult<Record> {
        self.update_fields(id, record).await?;
        self.get(id).await
    }

    /// Physically remove a record. Returns the number removed (0 or 1).
    ///
    /// Ids match case-insensitively; soft-deleted records are removable.
    pub async fn delete(&self, id: &str) -> AppResult<u64> {
        let options = DeleteOptions {
            collation: Some(Collation::case_insensitive(
                self.settings.collation_locale.clone(),
            )),
        };
        let removed = self
            .session
            .delete_one(
                &self.collection,
                self.descriptor.id_filter(id, &self.scope),
                options,
            )
            .await?;
        if removed == 0 {
            warn!(entity = self.descriptor.name, id, "Nothing to delete");
        } else {
            debug!(entity = self.descriptor.name, id, "Deleted record");
        }
        Ok(removed)
    }

    fn not_found(&self, id: &str) -> AppError {
        AppError::not_found(format!("{} '{id}' not found", self.descriptor.name))
            .with_detail(id.to_string())
    }
}
