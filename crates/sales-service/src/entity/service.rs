//! The per-entity service façade.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bson::Bson;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use sales_core::error::{AppError, ErrorKind};
use sales_core::result::AppResult;
use sales_core::traits::{IdGenerator, StoreSession};
use sales_core::types::record::decode_record;
use sales_core::types::{ListQuery, ListResponse, Record, Scope};
use sales_database::EntityRepository;
use sales_entity::{CustomerScope, EntityDescriptor, fields};

use crate::context::ServiceContext;
use crate::props::ServiceProps;

/// Tenant-scoped CRUD for one entity type.
///
/// Opened for a business (and customer, where the entity requires one)
/// whose existence is checked up front. Owns one store session until
/// [`EntityService::close`]; every call after that fails with
/// `CLOSED_SERVICE`.
#[derive(Debug)]
pub struct EntityService {
    descriptor: EntityDescriptor,
    repo: EntityRepository,
    session: Arc<dyn StoreSession>,
    id_generator: Arc<dyn IdGenerator>,
    closed: AtomicBool,
}

impl EntityService {
    /// Open a service for `descriptor` within the scope named by `props`.
    ///
    /// Fails with `MISSING_PARAMETER` if a required scope id is absent and
    /// with `INVALID_TENANT` / `INVALID_CUSTOMER` if it does not exist. The
    /// session is released before any validation error is returned.
    pub async fn open(
        descriptor: EntityDescriptor,
        ctx: &ServiceContext,
        props: ServiceProps,
    ) -> AppResult<Self> {
        let scope = Self::resolve_scope(&descriptor, &props)?;
        let session = ctx.store.open_session().await?;

        if let Err(e) = Self::validate_scope(ctx, &scope).await {
            warn!(
                entity = descriptor.name,
                business_id = ?scope.business_id,
                customer_id = ?scope.customer_id,
                error = %e,
                "Rejected service scope"
            );
            session.close().await;
            return Err(e);
        }

        let repo = EntityRepository::new(
            Arc::clone(&session),
            descriptor,
            scope,
            ctx.settings.clone(),
        )
        .with_actor(props.actor().map(str::to_string));

        debug!(entity = descriptor.name, scope = ?repo.scope(), "Opened service");
        Ok(Self {
            descriptor,
            repo,
            session,
            id_generator: Arc::clone(&ctx.id_generator),
            closed: AtomicBool::new(false),
        })
    }

    fn resolve_scope(descriptor: &EntityDescriptor, props: &ServiceProps) -> AppResult<Scope> {
        let mut scope = Scope::unscoped();
        if descriptor.business_scoped {
            let business_id = props
                .business_id()
                .ok_or_else(|| AppError::missing_parameter(fields::BUSINESS_ID))?;
            scope.business_id = Some(business_id.to_string());
        }
        match descriptor.customer_scope {
            CustomerScope::None => {}
            CustomerScope::Optional => {
                scope.customer_id = props.customer_id().map(str::to_string);
            }
            CustomerScope::Required => {
                let customer_id = props
                    .customer_id()
                    .ok_or_else(|| AppError::missing_parameter(fields::CUSTOMER_ID))?;
                scope.customer_id = Some(customer_id.to_string());
            }
        }
        Ok(scope)
    }

    async fn validate_scope(ctx: &ServiceContext, scope: &Scope) -> AppResult<()> {
        let Some(business_id) = scope.business_id.as_deref() else {
            return Ok(());
        };
        ctx.business_lookup
            .get_business(business_id)
            .await
            .map_err(|e| match e.kind {
                ErrorKind::NotFound => AppError::invalid_tenant(business_id),
                _ => e,
            })?;

        if let Some(customer_id) = scope.customer_id.as_deref() {
            ctx.customer_lookup
                .get_customer(business_id, customer_id)
                .await
                .map_err(|e| match e.kind {
                    ErrorKind::NotFound => AppError::invalid_customer(customer_id),
                    _ => e,
                })?;
        }
        Ok(())
    }

    fn ensure_open(&self) -> AppResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(AppError::closed_service(format!(
                "{} service is closed",
                self.descriptor.name
            )));
        }
        Ok(())
    }

    /// The entity this service serves.
    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.descriptor
    }

    /// The scope fixed at construction.
    pub fn scope(&self) -> &Scope {
        self.repo.scope()
    }

    /// Page through live records.
    pub async fn list(&self, query: &ListQuery) -> AppResult<ListResponse> {
        self.ensure_open()?;
        self.repo.list(query).await
    }

    /// Page through live and soft-deleted records.
    pub async fn list_deleted(&self, query: &ListQuery) -> AppResult<ListResponse> {
        self.ensure_open()?;
        self.repo.list(&query.clone().with_deleted()).await
    }

    /// Fetch a record by id.
    pub async fn get(&self, id: &str) -> AppResult<Record> {
        self.ensure_open()?;
        self.repo.get(id).await
    }

    /// Fetch a record by id, decoded into `T`.
    pub async fn get_as<T: DeserializeOwned>(&self, id: &str) -> AppResult<T> {
        decode_record(self.get(id).await?)
    }

    /// Fetch the first record matching a filter expression.
    pub async fn find(&self, filter: &str) -> AppResult<Record> {
        self.ensure_open()?;
        self.repo.find(filter).await
    }

    /// Fetch the first record matching a filter expression, decoded into `T`.
    pub async fn find_as<T: DeserializeOwned>(&self, filter: &str) -> AppResult<T> {
        decode_record(self.find(filter).await?)
    }

    /// Create a record.
    ///
    /// A caller-supplied id is trimmed and lower-cased; otherwise one is
    /// generated with the entity prefix. Scope fields are overwritten with
    /// the service's; a customer-scoped entity created without a customer
    /// in scope never keeps a caller `customer_id`.
    pub async fn create(&self, mut record: Record) -> AppResult<Record> {
        self.ensure_open()?;
        let id = self.assign_id(&record)?;
        record.insert(self.descriptor.id_field, id.as_str());

        let scope = self.repo.scope();
        if let Some(business_id) = &scope.business_id {
            record.insert(fields::BUSINESS_ID, business_id.as_str());
        }
        match &scope.customer_id {
            Some(customer_id) => {
                record.insert(fields::CUSTOMER_ID, customer_id.as_str());
            }
            None if self.descriptor.customer_scope != CustomerScope::None => {
                record.remove(fields::CUSTOMER_ID);
            }
            None => {}
        }

        let created = self.repo.create(record).await?;
        info!(entity = self.descriptor.name, id = %id, "Created record");
        Ok(created)
    }

    fn assign_id(&self, record: &Record) -> AppResult<String> {
        match record.get(self.descriptor.id_field) {
            Some(Bson::String(id)) if !id.trim().is_empty() => Ok(id.trim().to_lowercase()),
            None | Some(Bson::String(_)) | Some(Bson::Null) => {
                Ok(self.id_generator.generate(self.descriptor.id_prefix))
            }
            Some(other) => Err(AppError::validation(format!(
                "'{}' must be a string, got {:?}",
                self.descriptor.id_field,
                other.element_type()
            ))),
        }
    }

    /// Apply a partial update.
    ///
    /// Scope fields and the id field are dropped from the input.
    pub async fn update(&self, id: &str, mut record: Record) -> AppResult<Record> {
        self.ensure_open()?;
        for field in self.descriptor.immutable_fields() {
            if record.remove(field).is_some() {
                debug!(entity = self.descriptor.name, field, "Dropped immutable field from update");
            }
        }
        self.repo.update(id, record).await
    }

    /// Delete a record: physically if `permanent`, otherwise by marking it
    /// deleted. Returns the number of records affected.
    ///
    /// A soft delete of an unknown (or already deleted) id fails with
    /// `NOT_FOUND`; a permanent delete of an unknown id affects nothing.
    pub async fn delete(&self, id: &str, permanent: bool) -> AppResult<u64> {
        self.ensure_open()?;
        if permanent {
            let removed = self.repo.delete(id).await?;
            info!(entity = self.descriptor.name, id, removed, "Permanently deleted record");
            return Ok(removed);
        }

        let mut marker = Record::new();
        marker.insert(fields::IS_DELETED, true);
        let outcome = self.repo.update_fields(id, marker).await?;
        if outcome.matched == 0 {
            return Err(AppError::not_found(format!(
                "{} '{id}' not found",
                self.descriptor.name
            ))
            .with_detail(id.to_string()));
        }
        info!(entity = self.descriptor.name, id, "Soft-deleted record");
        Ok(outcome.matched)
    }

    /// Release the store session. Idempotent.
    pub async fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.session.close().await;
            debug!(entity = self.descriptor.name, "Closed service");
        }
    }

    /// Whether [`EntityService::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
