//! Schemaless entity records.
//!
//! A record is a BSON document: field name to value. Conversions to and
//! from JSON use MongoDB extended JSON (relaxed form on output).

use bson::{Bson, Document};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::result::AppResult;

/// One business object (brand, product, cart line, ...).
pub type Record = Document;

/// Decode a record into a caller-defined type.
pub fn decode_record<T: DeserializeOwned>(record: Record) -> AppResult<T> {
    Ok(bson::from_document(record)?)
}

/// Encode a caller-defined type into a record.
pub fn encode_record<T: Serialize>(value: &T) -> AppResult<Record> {
    Ok(bson::to_document(value)?)
}

/// Parse a JSON object (extended JSON allowed) into a record.
pub fn record_from_json(value: serde_json::Value) -> AppResult<Record> {
    match Bson::try_from(value) {
        Ok(Bson::Document(doc)) => Ok(doc),
        Ok(other) => Err(AppError::validation(format!(
            "Expected a JSON object for a record, got {:?}",
            other.element_type()
        ))),
        Err(e) => Err(AppError::validation(format!("Invalid extended JSON: {e}"))),
    }
}

/// Render a record as relaxed extended JSON.
pub fn record_to_json(record: &Record) -> serde_json::Value {
    Bson::Document(record.clone()).into_relaxed_extjson()
}

/// Read a non-empty string field.
pub fn string_field<'a>(record: &'a Record, field: &str) -> Option<&'a str> {
    record
        .get_str(field)
        .ok()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Brand {
        brand_id: String,
        brand_name: String,
    }

    #[test]
    fn test_decode_record() {
        let record = doc! { "brand_id": "acme", "brand_name": "Acme", "is_deleted": false };
        let brand: Brand = decode_record(record).expect("decode");
        assert_eq!(brand.brand_id, "acme");
    }

    #[test]
    fn test_decode_record_wrong_shape() {
        let record = doc! { "brand_id": 42 };
        let err = decode_record::<Brand>(record).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Decode);
    }

    #[test]
    fn test_record_from_json_rejects_arrays() {
        let err = record_from_json(serde_json::json!([1, 2])).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Validation);
    }

    #[test]
    fn test_record_from_json_reads_typed_literals() {
        let record =
            record_from_json(serde_json::json!({ "qty": { "$numberLong": "7" } })).expect("parse");
        assert_eq!(record.get_i64("qty").ok(), Some(7));
    }

    #[test]
    fn test_string_field_ignores_blank() {
        let record = doc! { "a": "  ", "b": "x", "c": 1 };
        assert_eq!(string_field(&record, "a"), None);
        assert_eq!(string_field(&record, "b"), Some("x"));
        assert_eq!(string_field(&record, "c"), None);
    }
}
