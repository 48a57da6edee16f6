//! Repository behavior configuration.

use serde::{Deserialize, Serialize};

/// Settings shared by every entity repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Reject malformed filter/sort expressions with `MALFORMED_FILTER`
    /// instead of logging them and treating them as empty.
    #[serde(default)]
    pub strict_filters: bool,
    /// Collation locale used when matching ids for physical deletes.
    #[serde(default = "default_collation_locale")]
    pub collation_locale: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            strict_filters: false,
            collation_locale: default_collation_locale(),
        }
    }
}

fn default_collation_locale() -> String {
    "en".to_string()
}
