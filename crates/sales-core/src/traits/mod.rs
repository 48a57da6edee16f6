//! Core traits defined in `sales-core` and implemented by other crates.

pub mod id_generator;
pub mod lookup;
pub mod store;

pub use id_generator::IdGenerator;
pub use lookup::{BusinessLookup, CustomerLookup};
pub use store::{Collation, DeleteOptions, DocumentStore, FindOptions, StoreSession, UpdateOutcome};
