//! System-managed fields injected or stripped at each persistence stage.
//!
//! All transforms are pure: the timestamp and actor come in through an
//! [`AuditStamp`], so applying a transform twice with the same stamp yields
//! the same record.

use bson::DateTime;

use sales_core::types::Record;

use crate::fields;

/// When and by whom a write happens.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditStamp {
    /// Write time.
    pub at: DateTime,
    /// Acting user, if known.
    pub actor: Option<String>,
}

impl AuditStamp {
    /// Stamp for a write happening now.
    pub fn now(actor: Option<&str>) -> Self {
        Self::at(DateTime::now(), actor)
    }

    /// Stamp for a write at a fixed time.
    pub fn at(at: DateTime, actor: Option<&str>) -> Self {
        Self {
            at,
            actor: actor.map(str::to_string),
        }
    }
}

/// Prepare a record for insertion.
///
/// Drops caller-supplied system fields, forces `is_deleted = false`, and
/// stamps creation and update metadata. Id and tenant fields are left as
/// given.
pub fn prepare_for_create(mut record: Record, stamp: &AuditStamp) -> Record {
    strip_system_fields(&mut record);
    record.insert(fields::IS_DELETED, false);
    record.insert(fields::CREATED_AT, stamp.at);
    record.insert(fields::UPDATED_AT, stamp.at);
    if let Some(actor) = &stamp.actor {
        record.insert(fields::CREATED_BY, actor.as_str());
        record.insert(fields::UPDATED_BY, actor.as_str());
    }
    record
}

/// Prepare a partial record for a `$set` update.
///
/// Drops caller-supplied system fields and stamps update metadata.
/// `is_deleted` is kept only if the caller included it.
pub fn prepare_for_update(mut record: Record, stamp: &AuditStamp) -> Record {
    strip_system_fields(&mut record);
    record.insert(fields::UPDATED_AT, stamp.at);
    if let Some(actor) = &stamp.actor {
        record.insert(fields::UPDATED_BY, actor.as_str());
    }
    record
}

/// Remove internal bookkeeping before a record leaves the repository.
pub fn strip_for_get(mut record: Record) -> Record {
    record.remove(fields::INTERNAL_ID);
    record
}

fn strip_system_fields(record: &mut Record) {
    record.remove(fields::INTERNAL_ID);
    for field in fields::AUDIT_FIELDS {
        record.remove(field);
    }
}
