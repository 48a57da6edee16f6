//! Prefixed unique identifier generation.

use uuid::Uuid;

use crate::traits::IdGenerator;

/// Default identifier generator.
///
/// Produces `{prefix}_{uuid-v7 hex}`: lower-case, time-ordered, and
/// collision-resistant across processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueIdGenerator;

impl UniqueIdGenerator {
    /// Create a new generator.
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for UniqueIdGenerator {
    fn generate(&self, prefix: &str) -> String {
        format!("{prefix}_{}", Uuid::now_v7().simple())
    }
}
