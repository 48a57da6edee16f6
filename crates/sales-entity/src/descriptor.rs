//! The generic entity configuration.

use bson::Document;

use sales_core::types::Scope;

use crate::fields;

/// How an entity relates to customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerScope {
    /// Visible to the whole business.
    None,
    /// Restricted to a customer when the service was opened with one.
    Optional,
    /// Always restricted to the customer the service was opened with.
    Required,
}

/// Describes one entity type: where it lives and how it is scoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// Human-readable entity name (`"brand"`).
    pub name: &'static str,
    /// Logical collection name, before the store prefix.
    pub collection: &'static str,
    /// Primary key field (`"brand_id"`).
    pub id_field: &'static str,
    /// Display-name field, if the entity has one.
    pub name_field: Option<&'static str>,
    /// Prefix for generated ids (`"brnd"`).
    pub id_prefix: &'static str,
    /// Whether records belong to a business.
    pub business_scoped: bool,
    /// Customer scoping rule.
    pub customer_scope: CustomerScope,
}

impl EntityDescriptor {
    /// A business-scoped entity with no customer scope and no name field.
    pub const fn new(
        name: &'static str,
        collection: &'static str,
        id_field: &'static str,
        id_prefix: &'static str,
    ) -> Self {
        Self {
            name,
            collection,
            id_field,
            name_field: None,
            id_prefix,
            business_scoped: true,
            customer_scope: CustomerScope::None,
        }
    }

    /// Set the display-name field.
    pub const fn with_name_field(mut self, field: &'static str) -> Self {
        self.name_field = Some(field);
        self
    }

    /// Set the customer scoping rule.
    pub const fn with_customer_scope(mut self, scope: CustomerScope) -> Self {
        self.customer_scope = scope;
        self
    }

    /// Mark the entity as not belonging to any business.
    pub const fn unscoped(mut self) -> Self {
        self.business_scoped = false;
        self
    }

    /// Whether the customer filter applies under `scope`.
    pub fn filters_customer(&self, scope: &Scope) -> bool {
        self.customer_scope != CustomerScope::None && scope.customer_id.is_some()
    }

    /// Filter restricting a query to `scope` (no soft-delete term).
    pub fn scope_filter(&self, scope: &Scope) -> Document {
        let mut filter = Document::new();
        if self.business_scoped {
            if let Some(business_id) = &scope.business_id {
                filter.insert(fields::BUSINESS_ID, business_id.as_str());
            }
        }
        if self.filters_customer(scope) {
            if let Some(customer_id) = &scope.customer_id {
                filter.insert(fields::CUSTOMER_ID, customer_id.as_str());
            }
        }
        filter
    }

    /// Filter selecting one record by id within `scope`.
    pub fn id_filter(&self, id: &str, scope: &Scope) -> Document {
        let mut filter = Document::new();
        filter.insert(self.id_field, id);
        filter.extend(self.scope_filter(scope));
        filter
    }

    /// Fields callers may never change through an update.
    pub fn immutable_fields(&self) -> Vec<&'static str> {
        let mut immutable = Vec::with_capacity(3);
        if self.business_scoped {
            immutable.push(fields::BUSINESS_ID);
        }
        if self.customer_scope != CustomerScope::None {
            immutable.push(fields::CUSTOMER_ID);
        }
        immutable.push(self.id_field);
        immutable
    }

    /// Keys of the unique index enforcing id uniqueness per tenant (and
    /// per customer, for entities that always belong to one).
    pub fn unique_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::with_capacity(3);
        if self.business_scoped {
            keys.push(fields::BUSINESS_ID);
        }
        if self.customer_scope == CustomerScope::Required {
            keys.push(fields::CUSTOMER_ID);
        }
        keys.push(self.id_field);
        keys
    }
}
