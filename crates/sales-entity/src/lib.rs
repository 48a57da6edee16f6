//! # sales-entity
//!
//! Every sales entity (brand, product, cart, order, ...) is one
//! [`EntityDescriptor`]: its collection, id field, id prefix, and scoping
//! rules. This crate holds the descriptor type, the catalog of all sales
//! entities, shared field names, and the pure lifecycle transforms applied
//! around persistence.

pub mod catalog;
pub mod descriptor;
pub mod fields;
pub mod lifecycle;

pub use descriptor::{CustomerScope, EntityDescriptor};
pub use lifecycle::AuditStamp;
