//! # sales-database
//!
//! Document store backends and the generic entity repository.
//!
//! - **mongodb**: production backend built on the official driver
//! - **memory**: in-process store evaluating the same query dialect,
//!   used by tests and embedded deployments
//!
//! The backend is selected at runtime by [`StoreManager`] from
//! configuration. [`EntityRepository`] implements the list/get/find/
//! create/update/delete pattern for any [`sales_entity::EntityDescriptor`].

pub mod filter;
pub mod manager;
#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "mongodb-backend")]
pub mod mongo;
pub mod repositories;

pub use manager::StoreManager;
pub use repositories::{EntityRepository, StoreBusinessLookup, StoreCustomerLookup};
