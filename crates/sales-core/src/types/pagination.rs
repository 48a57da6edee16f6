//! List request and response types.

use serde::{Deserialize, Serialize};

use crate::types::record::{Record, record_to_json};

/// Parameters for a list call.
///
/// `filter` and `sort` are extended-JSON documents in text form; an empty
/// string means "no constraint". `skip` and `limit` of `0` mean "no skip"
/// and "no limit".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    /// Caller filter expression.
    #[serde(default)]
    pub filter: String,
    /// Caller sort expression.
    #[serde(default)]
    pub sort: String,
    /// Number of matching records to skip.
    #[serde(default)]
    pub skip: u64,
    /// Maximum number of records to return.
    #[serde(default)]
    pub limit: u64,
    /// Also return soft-deleted records.
    #[serde(default)]
    pub include_deleted: bool,
}

impl ListQuery {
    /// Create a list query.
    pub fn new(filter: impl Into<String>, sort: impl Into<String>, skip: u64, limit: u64) -> Self {
        Self {
            filter: filter.into(),
            sort: sort.into(),
            skip,
            limit,
            include_deleted: false,
        }
    }

    /// List everything in scope.
    pub fn all() -> Self {
        Self::default()
    }

    /// Include soft-deleted records.
    pub fn with_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }
}

/// Counts reported alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    /// Records in scope, ignoring the caller filter.
    pub total: u64,
    /// Records in scope matching the caller filter, ignoring skip/limit.
    pub filtered: u64,
    /// Records in the returned page.
    pub result: u64,
}

/// A page of records plus its summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    /// Count summary.
    pub summary: ListSummary,
    /// The returned page.
    pub results: Vec<Record>,
}

impl ListResponse {
    /// Build a response, deriving `result` from the page length.
    pub fn new(results: Vec<Record>, total: u64, filtered: u64) -> Self {
        Self {
            summary: ListSummary {
                total,
                filtered,
                result: results.len() as u64,
            },
            results,
        }
    }

    /// Render as relaxed extended JSON.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "summary": {
                "total": self.summary.total,
                "filtered": self.summary.filtered,
                "result": self.summary.result,
            },
            "results": self.results.iter().map(record_to_json).collect::<Vec<_>>(),
        })
    }
}
