//! Repositories over the document store.

pub mod entity;
pub mod lookup;

pub use entity::EntityRepository;
pub use lookup::{StoreBusinessLookup, StoreCustomerLookup};
