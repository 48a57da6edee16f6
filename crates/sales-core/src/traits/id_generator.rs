//! Identifier generation trait.

/// Produces collision-resistant identifiers carrying a readable prefix
/// (e.g. `brnd`, `crt`, `c_order`).
pub trait IdGenerator: Send + Sync + std::fmt::Debug + 'static {
    /// Generate a new identifier starting with `prefix`.
    fn generate(&self, prefix: &str) -> String;
}
