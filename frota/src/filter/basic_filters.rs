use std::{any::Any, fmt::Display};

use bson::{Bson, Document};

use crate::{
    common::{resolve_field, validate_field_name, values_equal},
    errors::FrotaResult,
};

use super::FilterProvider;

/// A filter that matches all documents.
pub(crate) struct AllFilter;

impl FilterProvider for AllFilter {
    fn apply(&self, _entry: &Document) -> FrotaResult<bool> {
        Ok(true)
    }

    fn to_query(&self) -> FrotaResult<Document> {
        Ok(Document::new())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Display for AllFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllFilter")
    }
}

/// A filter that matches documents where a field equals a specific value.
///
/// Follows the document store's equality rules: numbers compare across
/// int32/int64/double, a missing field equals `null`, and an array field
/// matches when the array itself or any of its elements equals the value.
pub(crate) struct EqualsFilter {
    field_name: String,
    field_value: Bson,
}

impl EqualsFilter {
    #[inline]
    pub(crate) fn new(field_name: String, field_value: Bson) -> Self {
        EqualsFilter {
            field_name,
            field_value,
        }
    }
}

impl Display for EqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} == {})", self.field_name, self.field_value)
    }
}

impl FilterProvider for EqualsFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> FrotaResult<bool> {
        validate_field_name(&self.field_name)?;

        let values = resolve_field(entry, &self.field_name);
        if values.is_empty() {
            return Ok(self.field_value == Bson::Null);
        }

        Ok(values.into_iter().any(|value| match value {
            Bson::Array(items) => {
                values_equal(value, &self.field_value)
                    || items.iter().any(|item| values_equal(item, &self.field_value))
            }
            _ => values_equal(value, &self.field_value),
        }))
    }

    fn to_query(&self) -> FrotaResult<Document> {
        validate_field_name(&self.field_name)?;

        let mut condition = Document::new();
        condition.insert("$eq", self.field_value.clone());

        let mut query = Document::new();
        query.insert(self.field_name.clone(), condition);
        Ok(query)
    }

    fn has_field(&self) -> bool {
        true
    }

    fn get_field_name(&self) -> FrotaResult<String> {
        Ok(self.field_name.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
