//! Unified application error types for the sales module.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Every error carries a stable code
//! (from its [`ErrorKind`]), a message, and an optional detail string.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the sales module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A required construction input (tenant or customer id) was absent.
    MissingParameter,
    /// The referenced business does not exist.
    InvalidTenant,
    /// The referenced customer does not exist.
    InvalidCustomer,
    /// No document matched the id or filter.
    NotFound,
    /// An insert collided with an existing id in scope.
    DuplicateKey,
    /// A stored document could not be decoded into the requested shape.
    Decode,
    /// The document store or driver failed.
    Repository,
    /// A caller-supplied filter or sort expression could not be parsed.
    MalformedFilter,
    /// The service (or its session) has been closed.
    ClosedService,
    /// Input validation failed.
    Validation,
    /// A configuration error occurred.
    Configuration,
    /// A serialization error occurred.
    Serialization,
}

impl ErrorKind {
    /// Stable machine-readable code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingParameter => "MISSING_PARAMETER",
            Self::InvalidTenant => "INVALID_TENANT",
            Self::InvalidCustomer => "INVALID_CUSTOMER",
            Self::NotFound => "NOT_FOUND",
            Self::DuplicateKey => "DUPLICATE_KEY",
            Self::Decode => "DECODE",
            Self::Repository => "REPOSITORY",
            Self::MalformedFilter => "MALFORMED_FILTER",
            Self::ClosedService => "CLOSED_SERVICE",
            Self::Validation => "VALIDATION",
            Self::Configuration => "CONFIGURATION",
            Self::Serialization => "SERIALIZATION",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The unified application error used throughout the sales module.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional detail for the caller (e.g. which id was missing).
    pub detail: Option<String>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
            source: Some(Box::new(source)),
        }
    }

    /// Attach a detail string.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Stable code of this error.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Whether this error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// Create a missing-parameter error.
    pub fn missing_parameter(name: &str) -> Self {
        Self::new(
            ErrorKind::MissingParameter,
            format!("Missing required parameter '{name}'"),
        )
        .with_detail(name.to_string())
    }

    /// Create an invalid-tenant error.
    pub fn invalid_tenant(business_id: &str) -> Self {
        Self::new(ErrorKind::InvalidTenant, "Invalid business_id")
            .with_detail(format!("Given business_id '{business_id}' does not exist"))
    }

    /// Create an invalid-customer error.
    pub fn invalid_customer(customer_id: &str) -> Self {
        Self::new(ErrorKind::InvalidCustomer, "Invalid customer_id")
            .with_detail(format!("Given customer_id '{customer_id}' does not exist"))
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a duplicate-key error.
    pub fn duplicate_key(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateKey, message)
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    /// Create a repository error.
    pub fn repository(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Repository, message)
    }

    /// Create a malformed-filter error.
    pub fn malformed_filter(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedFilter, message)
    }

    /// Create a closed-service error.
    pub fn closed_service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ClosedService, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            detail: self.detail.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<bson::de::Error> for AppError {
    fn from(err: bson::de::Error) -> Self {
        Self::with_source(
            ErrorKind::Decode,
            format!("Failed to decode document: {err}"),
            err,
        )
    }
}

impl From<bson::ser::Error> for AppError {
    fn from(err: bson::ser::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("Failed to encode document: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
