//! Mapping of driver errors into [`AppError`].

use mongodb::error::{Error, ErrorKind as DriverErrorKind, WriteFailure};

use sales_core::error::{AppError, ErrorKind};

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Translate a driver error raised during `operation`.
pub(crate) fn map_driver_error(operation: &str, err: Error) -> AppError {
    let kind = if is_duplicate_key(&err) {
        ErrorKind::DuplicateKey
    } else if matches!(err.kind.as_ref(), DriverErrorKind::BsonDeserialization(_)) {
        ErrorKind::Decode
    } else {
        ErrorKind::Repository
    };
    AppError::with_source(kind, format!("MongoDB {operation} failed: {err}"), err)
}

fn is_duplicate_key(err: &Error) -> bool {
    match err.kind.as_ref() {
        DriverErrorKind::Write(WriteFailure::WriteError(write)) => write.code == DUPLICATE_KEY_CODE,
        DriverErrorKind::Command(command) => command.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}
