//! In-process document store.

mod matcher;
mod store;

pub use store::{MemorySession, MemoryStore};
