//! Evaluation of MongoDB query documents against in-memory documents.
//!
//! Supported: implicit AND across keys, `$and`, `$or`, `$nor`, and the
//! field operators `$eq`, `$ne`, `$gt`, `$gte`, `$lt`, `$lte`, `$in`,
//! `$nin`, `$exists`, `$regex` (with `$options`), `$not`, `$size`.
//! Dotted paths descend into sub-documents and fan out over arrays.
//! Anything else is rejected with a repository error, as the server would.

use std::cmp::Ordering;

use bson::{Bson, Document};
use regex::{Regex, RegexBuilder};

use sales_core::error::{AppError, ErrorKind};
use sales_core::result::AppResult;

/// How strings compare.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MatchOptions {
    /// Compare strings ignoring case (primary-strength collation).
    pub case_insensitive: bool,
}

/// Whether `doc` satisfies `filter`.
pub(crate) fn matches(doc: &Document, filter: &Document, opts: MatchOptions) -> AppResult<bool> {
    for (key, condition) in filter {
        let ok = match key.as_str() {
            "$and" => {
                let mut all = true;
                for clause in clauses(key, condition)? {
                    if !matches(doc, clause, opts)? {
                        all = false;
                        break;
                    }
                }
                all
            }
            "$or" => any_clause(doc, key, condition, opts)?,
            "$nor" => !any_clause(doc, key, condition, opts)?,
            op if op.starts_with('$') => return Err(unsupported(op)),
            path => matches_field(&lookup(doc, path), condition, opts)?,
        };
        if !ok {
            return Ok(false);
        }
    }
    Ok(true)
}

fn any_clause(doc: &Document, op: &str, condition: &Bson, opts: MatchOptions) -> AppResult<bool> {
    for clause in clauses(op, condition)? {
        if matches(doc, clause, opts)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn clauses<'a>(op: &str, condition: &'a Bson) -> AppResult<Vec<&'a Document>> {
    let Bson::Array(items) = condition else {
        return Err(AppError::repository(format!("{op} must be an array")));
    };
    if items.is_empty() {
        return Err(AppError::repository(format!("{op} must be a nonempty array")));
    }
    items
        .iter()
        .map(|item| match item {
            Bson::Document(clause) => Ok(clause),
            _ => Err(AppError::repository(format!("{op} entries must be objects"))),
        })
        .collect()
}

fn unsupported(op: &str) -> AppError {
    AppError::repository(format!("Unsupported query operator: {op}"))
}

/// Values found at a dotted path. Empty when the path is missing.
pub(crate) fn lookup<'a>(doc: &'a Document, path: &str) -> Vec<&'a Bson> {
    let mut segments = path.split('.');
    let Some(first) = segments.next() else {
        return Vec::new();
    };
    let mut current: Vec<&Bson> = doc.get(first).into_iter().collect();
    for segment in segments {
        let mut next = Vec::new();
        for value in current {
            match value {
                Bson::Document(sub) => next.extend(sub.get(segment)),
                Bson::Array(items) => {
                    if let Ok(index) = segment.parse::<usize>() {
                        next.extend(items.get(index));
                    } else {
                        next.extend(items.iter().filter_map(|item| match item {
                            Bson::Document(sub) => sub.get(segment),
                            _ => None,
                        }));
                    }
                }
                _ => {}
            }
        }
        current = next;
    }
    current
}

fn is_operator_document(condition: &Bson) -> Option<&Document> {
    match condition {
        Bson::Document(ops) if !ops.is_empty() && ops.keys().all(|k| k.starts_with('$')) => {
            Some(ops)
        }
        _ => None,
    }
}

fn matches_field(values: &[&Bson], condition: &Bson, opts: MatchOptions) -> AppResult<bool> {
    if let Some(ops) = is_operator_document(condition) {
        for (op, arg) in ops {
            if !apply_operator(values, op, arg, ops, opts)? {
                return Ok(false);
            }
        }
        return Ok(true);
    }
    if let Bson::RegularExpression(re) = condition {
        let compiled = compile_regex(&re.pattern, &re.options)?;
        return Ok(any_string(values, |s| compiled.is_match(s)));
    }
    Ok(equals_any(values, condition, opts))
}

fn apply_operator(
    values: &[&Bson],
    op: &str,
    arg: &Bson,
    ops: &Document,
    opts: MatchOptions,
) -> AppResult<bool> {
    match op {
        "$eq" => Ok(equals_any(values, arg, opts)),
        "$ne" => Ok(!equals_any(values, arg, opts)),
        "$gt" => Ok(compare_any(values, arg, opts, Ordering::is_gt)),
        "$gte" => Ok(compare_any(values, arg, opts, Ordering::is_ge)),
        "$lt" => Ok(compare_any(values, arg, opts, Ordering::is_lt)),
        "$lte" => Ok(compare_any(values, arg, opts, Ordering::is_le)),
        "$in" => in_list(values, op, arg, opts),
        "$nin" => in_list(values, op, arg, opts).map(|found| !found),
        "$exists" => Ok(truthy(arg) != values.is_empty()),
        "$regex" => {
            let options = match ops.get("$options") {
                Some(Bson::String(options)) => options.as_str(),
                Some(_) => return Err(AppError::repository("$options must be a string")),
                None => "",
            };
            let compiled = match arg {
                Bson::String(pattern) => compile_regex(pattern, options)?,
                Bson::RegularExpression(re) => {
                    let options = if options.is_empty() {
                        re.options.as_str()
                    } else {
                        options
                    };
                    compile_regex(&re.pattern, options)?
                }
                _ => return Err(AppError::repository("$regex has to be a string")),
            };
            Ok(any_string(values, |s| compiled.is_match(s)))
        }
        "$options" => {
            if ops.contains_key("$regex") {
                Ok(true)
            } else {
                Err(AppError::repository("$options needs a $regex"))
            }
        }
        "$not" => match arg {
            Bson::Document(_) | Bson::RegularExpression(_) => {
                Ok(!matches_field(values, arg, opts)?)
            }
            _ => Err(AppError::repository("$not needs a regex or a document")),
        },
        "$size" => {
            let size = as_f64(arg).ok_or_else(|| AppError::repository("$size needs a number"))?;
            Ok(values.iter().any(|value| match value {
                Bson::Array(items) => items.len() as f64 == size,
                _ => false,
            }))
        }
        other => Err(unsupported(other)),
    }
}

fn in_list(values: &[&Bson], op: &str, arg: &Bson, opts: MatchOptions) -> AppResult<bool> {
    let Bson::Array(candidates) = arg else {
        return Err(AppError::repository(format!("{op} needs an array")));
    };
    for candidate in candidates {
        let found = match candidate {
            Bson::RegularExpression(re) => {
                let compiled = compile_regex(&re.pattern, &re.options)?;
                any_string(values, |s| compiled.is_match(s))
            }
            _ => equals_any(values, candidate, opts),
        };
        if found {
            return Ok(true);
        }
    }
    Ok(false)
}

fn truthy(value: &Bson) -> bool {
    match value {
        Bson::Boolean(b) => *b,
        Bson::Null | Bson::Undefined => false,
        other => as_f64(other).is_none_or(|n| n != 0.0),
    }
}

fn compile_regex(pattern: &str, options: &str) -> AppResult<Regex> {
    let mut builder = RegexBuilder::new(pattern);
    for flag in options.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            other => {
                return Err(AppError::repository(format!(
                    "Invalid regular expression option: {other}"
                )));
            }
        };
    }
    builder
        .build()
        .map_err(|e| AppError::with_source(ErrorKind::Repository, "Invalid regular expression", e))
}

/// Strings at the path, including strings inside arrays.
fn any_string(values: &[&Bson], predicate: impl Fn(&str) -> bool) -> bool {
    values.iter().any(|value| match value {
        Bson::String(s) => predicate(s),
        Bson::Array(items) => items.iter().any(|item| match item {
            Bson::String(s) => predicate(s),
            _ => false,
        }),
        _ => false,
    })
}

/// Equality with array fan-out. `null` matches a missing path.
fn equals_any(values: &[&Bson], target: &Bson, opts: MatchOptions) -> bool {
    if values.is_empty() {
        return matches!(target, Bson::Null);
    }
    values.iter().any(|value| {
        values_equal(value, target, opts)
            || matches!(value, Bson::Array(items)
                if items.iter().any(|item| values_equal(item, target, opts)))
    })
}

fn compare_any(
    values: &[&Bson],
    target: &Bson,
    opts: MatchOptions,
    accept: fn(Ordering) -> bool,
) -> bool {
    let check = |value: &Bson| compare_same_type(value, target, opts).is_some_and(accept);
    values.iter().any(|value| match *value {
        Bson::Array(items) => items.iter().any(check),
        other => check(other),
    })
}

fn values_equal(a: &Bson, b: &Bson, opts: MatchOptions) -> bool {
    match (a, b) {
        (Bson::String(x), Bson::String(y)) if opts.case_insensitive => {
            x.to_lowercase() == y.to_lowercase()
        }
        _ => match (as_f64(a), as_f64(b)) {
            (Some(x), Some(y)) => x == y,
            _ => a == b,
        },
    }
}

fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}

/// Ordering between two values of the same BSON type class.
///
/// Range operators never match across type classes.
fn compare_same_type(a: &Bson, b: &Bson, opts: MatchOptions) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (as_f64(a), as_f64(b)) {
        return x.partial_cmp(&y);
    }
    match (a, b) {
        (Bson::String(x), Bson::String(y)) if opts.case_insensitive => {
            Some(x.to_lowercase().cmp(&y.to_lowercase()))
        }
        (Bson::String(x), Bson::String(y)) => Some(x.cmp(y)),
        (Bson::DateTime(x), Bson::DateTime(y)) => Some(x.cmp(y)),
        (Bson::Boolean(x), Bson::Boolean(y)) => Some(x.cmp(y)),
        (Bson::ObjectId(x), Bson::ObjectId(y)) => Some(x.bytes().cmp(&y.bytes())),
        (Bson::Timestamp(x), Bson::Timestamp(y)) => {
            Some((x.time, x.increment).cmp(&(y.time, y.increment)))
        }
        _ => None,
    }
}

/// Sort documents in place by a sort document (`{field: 1 | -1}`).
pub(crate) fn sort_documents(documents: &mut [Document], sort: &Document) -> AppResult<()> {
    let mut keys = Vec::with_capacity(sort.len());
    for (field, direction) in sort {
        let descending = match as_f64(direction) {
            Some(d) if d == 1.0 => false,
            Some(d) if d == -1.0 => true,
            _ => {
                return Err(AppError::repository(format!(
                    "Invalid sort direction for '{field}'"
                )));
            }
        };
        keys.push((field.as_str(), descending));
    }

    documents.sort_by(|a, b| {
        for (field, descending) in &keys {
            let ordering = canonical_cmp(sort_key(a, field), sort_key(b, field));
            let ordering = if *descending {
                ordering.reverse()
            } else {
                ordering
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
    Ok(())
}

static MISSING: Bson = Bson::Null;

fn sort_key<'a>(doc: &'a Document, field: &str) -> &'a Bson {
    lookup(doc, field).into_iter().next().unwrap_or(&MISSING)
}

fn type_rank(value: &Bson) -> u8 {
    match value {
        Bson::MinKey => 0,
        Bson::Null | Bson::Undefined => 1,
        Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) | Bson::Decimal128(_) => 2,
        Bson::String(_) | Bson::Symbol(_) => 3,
        Bson::Document(_) => 4,
        Bson::Array(_) => 5,
        Bson::Binary(_) => 6,
        Bson::ObjectId(_) => 7,
        Bson::Boolean(_) => 8,
        Bson::DateTime(_) => 9,
        Bson::Timestamp(_) => 10,
        Bson::RegularExpression(_) => 11,
        Bson::MaxKey => 13,
        _ => 12,
    }
}

/// Total order over BSON values following the server's type ranking.
fn canonical_cmp(a: &Bson, b: &Bson) -> Ordering {
    type_rank(a).cmp(&type_rank(b)).then_with(|| {
        if let (Some(x), Some(y)) = (as_f64(a), as_f64(b)) {
            return x.total_cmp(&y);
        }
        compare_same_type(a, b, MatchOptions::default()).unwrap_or(Ordering::Equal)
    })
}
