//! Entity services.

mod constructors;
mod service;

pub use service::EntityService;
