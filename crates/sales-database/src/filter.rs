//! Parsing of caller-supplied filter and sort expressions.
//!
//! Both are MongoDB extended-JSON objects in text form. An empty (or
//! all-whitespace) expression means "no constraint".

use bson::{Bson, Document};
use tracing::warn;

use sales_core::error::AppError;
use sales_core::result::AppResult;

/// Parse a filter expression into a query document.
///
/// With `strict = false` a malformed expression is logged and treated as
/// empty; with `strict = true` it fails with `MALFORMED_FILTER`.
pub fn parse_filter(expression: &str, strict: bool) -> AppResult<Document> {
    parse_expression("filter", expression, strict).map(Option::unwrap_or_default)
}

/// Parse a sort expression. `None` means natural order.
pub fn parse_sort(expression: &str, strict: bool) -> AppResult<Option<Document>> {
    Ok(parse_expression("sort", expression, strict)?.filter(|sort| !sort.is_empty()))
}

fn parse_expression(kind: &str, expression: &str, strict: bool) -> AppResult<Option<Document>> {
    let expression = expression.trim();
    if expression.is_empty() {
        return Ok(None);
    }

    match to_document(expression) {
        Ok(doc) => Ok(Some(doc)),
        Err(reason) if strict => Err(AppError::malformed_filter(format!(
            "Invalid {kind} expression: {reason}"
        ))
        .with_detail(expression.to_string())),
        Err(reason) => {
            warn!(kind, expression, reason = %reason, "Ignoring malformed expression");
            Ok(None)
        }
    }
}

fn to_document(expression: &str) -> Result<Document, String> {
    let value: serde_json::Value = serde_json::from_str(expression).map_err(|e| e.to_string())?;
    match Bson::try_from(value).map_err(|e| e.to_string())? {
        Bson::Document(doc) => Ok(doc),
        other => Err(format!("expected an object, got {:?}", other.element_type())),
    }
}

/// AND a caller filter with a mandatory constraint.
///
/// The caller filter is nested under `$and` so none of its keys can
/// override the constraint.
pub fn and_with(filter: Document, constraint: Document) -> Document {
    if filter.is_empty() {
        return constraint;
    }
    if constraint.is_empty() {
        return filter;
    }
    let mut combined = Document::new();
    combined.insert(
        "$and",
        vec![Bson::Document(filter), Bson::Document(constraint)],
    );
    combined
}
