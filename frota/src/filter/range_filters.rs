use std::{any::Any, cmp::Ordering, fmt::Display};

use bson::{Bson, Document};

use crate::{
    common::{compare_values, resolve_field, validate_field_name},
    errors::FrotaResult,
};

use super::FilterProvider;

/// The bound a [ComparisonFilter] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ComparisonMode {
    Greater,
    GreaterEqual,
    Lesser,
    LesserEqual,
}

impl ComparisonMode {
    fn operator(&self) -> &'static str {
        match self {
            ComparisonMode::Greater => "$gt",
            ComparisonMode::GreaterEqual => "$gte",
            ComparisonMode::Lesser => "$lt",
            ComparisonMode::LesserEqual => "$lte",
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            ComparisonMode::Greater => ">",
            ComparisonMode::GreaterEqual => ">=",
            ComparisonMode::Lesser => "<",
            ComparisonMode::LesserEqual => "<=",
        }
    }

    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            ComparisonMode::Greater => ordering == Ordering::Greater,
            ComparisonMode::GreaterEqual => ordering != Ordering::Less,
            ComparisonMode::Lesser => ordering == Ordering::Less,
            ComparisonMode::LesserEqual => ordering != Ordering::Greater,
        }
    }
}

/// A filter that matches documents where a field lies on one side of a bound.
///
/// Values of different type classes never compare, so a date bound never
/// matches a string field. A missing field never satisfies a bound.
pub(crate) struct ComparisonFilter {
    field_name: String,
    field_value: Bson,
    mode: ComparisonMode,
}

impl ComparisonFilter {
    #[inline]
    pub(crate) fn new(field_name: String, field_value: Bson, mode: ComparisonMode) -> Self {
        ComparisonFilter {
            field_name,
            field_value,
            mode,
        }
    }

    fn satisfies(&self, value: &Bson) -> bool {
        compare_values(value, &self.field_value)
            .map(|ordering| self.mode.accepts(ordering))
            .unwrap_or(false)
    }
}

impl Display for ComparisonFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({} {} {})",
            self.field_name,
            self.mode.symbol(),
            self.field_value
        )
    }
}

impl FilterProvider for ComparisonFilter {
    fn apply(&self, entry: &Document) -> FrotaResult<bool> {
        validate_field_name(&self.field_name)?;

        Ok(resolve_field(entry, &self.field_name)
            .into_iter()
            .any(|value| match value {
                Bson::Array(items) => items.iter().any(|item| self.satisfies(item)),
                _ => self.satisfies(value),
            }))
    }

    fn to_query(&self) -> FrotaResult<Document> {
        validate_field_name(&self.field_name)?;

        let mut condition = Document::new();
        condition.insert(self.mode.operator(), self.field_value.clone());

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::date_value;
    use bson::doc;
    use chrono::NaiveDate;

    fn filter(mode: ComparisonMode, value: impl Into<Bson>) -> ComparisonFilter {
        ComparisonFilter::new("code".to_string(), value.into(), mode)
    }

    #[test]
    fn test_bounds_on_equal_value() {
        let entry = doc! { "code": 10 };
        assert!(!filter(ComparisonMode::Greater, 10).apply(&entry).unwrap());
        assert!(filter(ComparisonMode::GreaterEqual, 10).apply(&entry).unwrap());
        assert!(!filter(ComparisonMode::Lesser, 10).apply(&entry).unwrap());
        assert!(filter(ComparisonMode::LesserEqual, 10).apply(&entry).unwrap());
    }

    #[test]
    fn test_bounds_across_numeric_types() {
        assert!(filter(ComparisonMode::Greater, 9.5).apply(&doc! { "code": 10_i64 }).unwrap());
        assert!(filter(ComparisonMode::Lesser, 11_i64).apply(&doc! { "code": 10_i32 }).unwrap());
    }

    #[test]
    fn test_missing_field_fails_every_bound() {
        let entry = doc! { "other": 1 };
        assert!(!filter(ComparisonMode::GreaterEqual, 0).apply(&entry).unwrap());
        assert!(!filter(ComparisonMode::LesserEqual, 0).apply(&entry).unwrap());
    }

    #[test]
    fn test_mismatched_types_never_match() {
        let entry = doc! { "code": "10" };
        assert!(!filter(ComparisonMode::GreaterEqual, 1).apply(&entry).unwrap());
        assert!(!filter(ComparisonMode::LesserEqual, 100).apply(&entry).unwrap());
    }

    #[test]
    fn test_array_matches_any_element() {
        let entry = doc! { "code": [1, 50] };
        assert!(filter(ComparisonMode::Greater, 40).apply(&entry).unwrap());
        assert!(!filter(ComparisonMode::Greater, 60).apply(&entry).unwrap());
    }

    #[test]
    fn test_date_bounds() {
        let day = |d| date_value(NaiveDate::from_ymd_opt(2024, 1, d).unwrap());
        let entry = doc! { "pickup": day(10) };
        let gte = ComparisonFilter::new("pickup".to_string(), day(10), ComparisonMode::GreaterEqual);
        let lt = ComparisonFilter::new("pickup".to_string(), day(10), ComparisonMode::Lesser);
        assert!(gte.apply(&entry).unwrap());
        assert!(!lt.apply(&entry).unwrap());
    }

    #[test]
    fn test_to_query_operators() {
        assert_eq!(
            filter(ComparisonMode::Greater, 1).to_query().unwrap(),
            doc! { "code": { "$gt": 1 } }
        );
        assert_eq!(
            filter(ComparisonMode::GreaterEqual, 1).to_query().unwrap(),
            doc! { "code": { "$gte": 1 } }
        );
        assert_eq!(
            filter(ComparisonMode::Lesser, 1).to_query().unwrap(),
            doc! { "code": { "$lt": 1 } }
        );
        assert_eq!(
            filter(ComparisonMode::LesserEqual, 1).to_query().unwrap(),
            doc! { "code": { "$lte": 1 } }
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(filter(ComparisonMode::LesserEqual, 5).to_string(), "(code <= 5)");
    }
}
