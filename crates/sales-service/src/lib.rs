//! # sales-service
//!
//! Service façade for every sales entity. A service is opened for one
//! tenant (and, for customer-facing entities, one customer), validates
//! that scope exists, and then exposes list/get/find/create/update/delete
//! with the scope fixed for its lifetime.
//!
//! Services follow constructor injection: all collaborators arrive through
//! a [`ServiceContext`] of `Arc` references.

pub mod context;
pub mod entity;
pub mod props;

pub use context::ServiceContext;
pub use entity::EntityService;
pub use props::ServiceProps;
