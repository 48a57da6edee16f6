//! # sales-core
//!
//! Core crate for the sales module. Contains the error taxonomy,
//! configuration schemas, explicit logging initialization, the
//! document-store and lookup traits, and the record/list types shared by
//! every entity.
//!
//! This crate has **no** internal dependencies on other sales crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
