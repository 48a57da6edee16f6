//! Core type definitions used across the sales workspace.

pub mod id;
pub mod pagination;
pub mod record;
pub mod scope;

pub use id::UniqueIdGenerator;
pub use pagination::{ListQuery, ListResponse, ListSummary};
pub use record::Record;
pub use scope::Scope;
