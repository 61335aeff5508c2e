use crate::errors::{ErrorKind, FrotaError, FrotaResult};
use bson::{Bson, Document};

/// Separator between the segments of an embedded field path, e.g. `vehicle.plate`.
pub const FIELD_SEPARATOR: &str = ".";

/// Name of the identifier field every stored document carries.
pub const DOC_ID: &str = "_id";

/// Checks that a field name can be used in a filter.
///
/// A field name is a non-empty path of non-empty segments joined by
/// [FIELD_SEPARATOR]. Segments must not start with `$`, which the store
/// reserves for operators.
pub fn validate_field_name(field_name: &str) -> FrotaResult<()> {
    if field_name.trim().is_empty() {
        return Err(FrotaError::new(
            "Field name cannot be empty",
            ErrorKind::FilterError,
        ));
    }

    for segment in field_name.split(FIELD_SEPARATOR) {
        if segment.is_empty() {
            return Err(FrotaError::new(
                &format!("Field name {} has an empty segment", field_name),
                ErrorKind::FilterError,
            ));
        }
        if segment.starts_with('$') {
            return Err(FrotaError::new(
                &format!("Field name {} uses a reserved operator prefix", field_name),
                ErrorKind::FilterError,
            ));
        }
    }
    Ok(())
}

/// Collects every value reachable from `document` by the (possibly dotted)
/// `field_name`.
///
/// Nested documents are walked segment by segment. When a segment lands on an
/// array, a numeric segment indexes into it, otherwise the remaining path is
/// applied to every embedded document in the array. An empty result means the
/// field is missing.
pub fn resolve_field<'a>(document: &'a Document, field_name: &str) -> Vec<&'a Bson> {
    let segments: Vec<&str> = field_name.split(FIELD_SEPARATOR).collect();
    let mut values = Vec::new();

    if let Some((first, rest)) = segments.split_first() {
        if let Some(value) = document.get(*first) {
            collect_values(value, rest, &mut values);
        }
    }
    values
}

fn collect_values<'a>(value: &'a Bson, segments: &[&str], values: &mut Vec<&'a Bson>) {
    let Some((segment, rest)) = segments.split_first() else {
        values.push(value);
        return;
    };

    match value {
        Bson::Document(document) => {
            if let Some(next) = document.get(*segment) {
                collect_values(next, rest, values);
            }
        }
        Bson::Array(items) => {
            if let Ok(index) = segment.parse::<usize>() {
                if let Some(item) = items.get(index) {
                    collect_values(item, rest, values);
                }
            } else {
                for item in items.iter().filter(|item| matches!(item, Bson::Document(_))) {
                    collect_values(item, segments, values);
                }
            }
        }
        _ => {}
    }
}
